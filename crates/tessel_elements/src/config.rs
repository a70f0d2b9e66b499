//! Configuration loaded from TOML
//!
//! ```toml
//! [theme]
//! color_scheme = "dark"
//!
//! [text_field]
//! optional_label = "Optional"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::theme::ColorScheme;

/// Default label shown by the optional decoration
pub const DEFAULT_OPTIONAL_LABEL: &str = "Опционально";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesselConfig {
    pub theme: ThemeConfig,
    pub text_field: TextFieldConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub color_scheme: ColorScheme,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFieldConfig {
    pub optional_label: String,
}

impl Default for TextFieldConfig {
    fn default() -> Self {
        Self {
            optional_label: DEFAULT_OPTIONAL_LABEL.to_string(),
        }
    }
}

impl TesselConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
