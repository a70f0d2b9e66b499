//! Appearance state shared by form elements
//!
//! Consumers drive most transitions (after validating a field they set
//! `appearance` to `error` or `valid`). The element itself only ever leaves
//! `error` on its own, when the user types non-empty text.
//!
//! ```text
//!            consumer              consumer
//!   Default ─────────► Error ◄───────────── Valid
//!      ▲                 │
//!      └─────────────────┘
//!        TEXT_ENTERED (non-empty input)
//! ```

use std::fmt;
use std::str::FromStr;

use tessel_core::StateTransitions;

use crate::attr::AttrDescriptor;

/// Events understood by the appearance state machine
pub mod appearance_events {
    /// The user typed and the resulting value is non-empty
    pub const TEXT_ENTERED: u32 = 100;
}

/// Visual validation state of a form element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Appearance {
    #[default]
    Default,
    Error,
    Valid,
}

impl Appearance {
    pub const ALL: [Appearance; 3] = [Appearance::Default, Appearance::Error, Appearance::Valid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::Default => "default",
            Appearance::Error => "error",
            Appearance::Valid => "valid",
        }
    }

    /// Parse a keyword, mapping anything unknown to `Default`
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown appearance keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAppearance(pub String);

impl FromStr for Appearance {
    type Err = UnknownAppearance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Appearance::Default),
            "error" => Ok(Appearance::Error),
            "valid" => Ok(Appearance::Valid),
            _ => Err(UnknownAppearance(s.to_string())),
        }
    }
}

impl StateTransitions for Appearance {
    fn on_event(&self, event: u32) -> Option<Self> {
        use appearance_events::*;

        match (self, event) {
            (Appearance::Error, TEXT_ENTERED) => Some(Appearance::Default),
            _ => None,
        }
    }
}

/// Properties supplied by the appearance base
pub const APPEARANCE_ATTRIBUTES: &[AttrDescriptor] = &[
    AttrDescriptor::enumerated(
        "appearance",
        "appearance",
        &["default", "error", "valid"],
        "default",
    ),
    AttrDescriptor::text("errorMessage", "error-message"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::PropValue;

    #[test]
    fn test_parse_roundtrip_keywords() {
        for appearance in Appearance::ALL {
            assert_eq!(appearance.as_str().parse::<Appearance>(), Ok(appearance));
        }
        assert!("warning".parse::<Appearance>().is_err());
        assert_eq!(Appearance::parse_lenient(Some("warning")), Appearance::Default);
        assert_eq!(Appearance::parse_lenient(None), Appearance::Default);
        assert_eq!(Appearance::parse_lenient(Some("Valid")), Appearance::Valid);
    }

    #[test]
    fn test_only_error_recovers_on_text() {
        use appearance_events::TEXT_ENTERED;

        assert_eq!(Appearance::Error.on_event(TEXT_ENTERED), Some(Appearance::Default));
        assert_eq!(Appearance::Default.on_event(TEXT_ENTERED), None);
        assert_eq!(Appearance::Valid.on_event(TEXT_ENTERED), None);

        let mut state = Appearance::Error;
        assert!(state.apply(TEXT_ENTERED));
        assert_eq!(state, Appearance::Default);
        assert!(!state.apply(TEXT_ENTERED));
    }

    #[test]
    fn test_appearance_attribute_defaults() {
        let appearance = APPEARANCE_ATTRIBUTES[0];
        assert_eq!(appearance.initial_value(), PropValue::text("default"));
        assert_eq!(appearance.from_attribute(Some("valid")), PropValue::text("valid"));
        assert_eq!(APPEARANCE_ATTRIBUTES[1].attribute, "error-message");
    }
}
