//! Color scheme context
//!
//! The document owns the active scheme as a signal; render passes read it
//! from there instead of from process-wide state.

use serde::{Deserialize, Serialize};

/// Light or dark color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }

    pub fn toggle(&self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_scheme() {
        assert!(ColorScheme::Light.toggle().is_dark());
        assert_eq!(ColorScheme::Dark.toggle(), ColorScheme::Light);
        assert_eq!(ColorScheme::default().toggle().toggle(), ColorScheme::Light);
    }
}
