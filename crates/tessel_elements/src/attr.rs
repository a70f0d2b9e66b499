//! Attribute descriptors and converters
//!
//! Every reactive property of an element is declared by an [`AttrDescriptor`]:
//! its property name, the attribute it is bound to and how values convert
//! between the two. Definitions are plain tables, so a generic dispatcher can
//! handle attribute changes for any element.
//!
//! ```rust
//! use tessel_elements::attr::{AttrDescriptor, PropValue};
//!
//! const MIN: AttrDescriptor = AttrDescriptor::nullable_number("min", "min");
//!
//! assert_eq!(MIN.from_attribute(Some("4")), PropValue::Number(Some(4.0)));
//! assert_eq!(MIN.from_attribute(Some("abc")), PropValue::Number(None));
//! assert_eq!(MIN.to_attribute(&PropValue::Number(None)), None);
//! ```

use std::fmt;

/// How an attribute string converts to a property value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrKind {
    /// Passed through unvalidated. Absent attribute yields `default`.
    Text { default: Option<&'static str> },
    /// Presence attribute
    Boolean,
    /// Number parsed leniently; anything unparsable is null
    NullableNumber,
    /// One of a fixed set of keywords, anything else yields `default`
    Enumerated {
        allowed: &'static [&'static str],
        default: &'static str,
    },
}

impl AttrKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttrKind::Text { .. } => "text",
            AttrKind::Boolean => "boolean",
            AttrKind::NullableNumber => "number",
            AttrKind::Enumerated { .. } => "enumerated",
        }
    }
}

/// Current value of a reactive property
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Text(Option<String>),
    Flag(bool),
    Number(Option<f64>),
}

impl PropValue {
    pub fn text(value: impl Into<String>) -> Self {
        PropValue::Text(Some(value.into()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(text) => text.as_deref(),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> bool {
        matches!(self, PropValue::Flag(true))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(number) => *number,
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PropValue::Text(_) => "text",
            PropValue::Flag(_) => "boolean",
            PropValue::Number(_) => "number",
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Text(Some(text)) => write!(f, "{text:?}"),
            PropValue::Flag(flag) => write!(f, "{flag}"),
            PropValue::Number(Some(number)) => write!(f, "{number}"),
            PropValue::Text(None) | PropValue::Number(None) => f.write_str("null"),
        }
    }
}

/// Declares one reactive property and its attribute binding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrDescriptor {
    /// Property name (camelCase)
    pub property: &'static str,
    /// Attribute name (lower case)
    pub attribute: &'static str,
    pub kind: AttrKind,
}

impl AttrDescriptor {
    pub const fn text(property: &'static str, attribute: &'static str) -> Self {
        Self {
            property,
            attribute,
            kind: AttrKind::Text { default: None },
        }
    }

    pub const fn text_with_default(
        property: &'static str,
        attribute: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            property,
            attribute,
            kind: AttrKind::Text {
                default: Some(default),
            },
        }
    }

    pub const fn boolean(property: &'static str, attribute: &'static str) -> Self {
        Self {
            property,
            attribute,
            kind: AttrKind::Boolean,
        }
    }

    pub const fn nullable_number(property: &'static str, attribute: &'static str) -> Self {
        Self {
            property,
            attribute,
            kind: AttrKind::NullableNumber,
        }
    }

    pub const fn enumerated(
        property: &'static str,
        attribute: &'static str,
        allowed: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            property,
            attribute,
            kind: AttrKind::Enumerated { allowed, default },
        }
    }

    /// Value a property holds before anything was written
    pub fn initial_value(&self) -> PropValue {
        self.from_attribute(None)
    }

    /// Convert an attribute string (or its absence) to a property value
    ///
    /// Never fails: invalid input maps to null or to the declared default.
    pub fn from_attribute(&self, raw: Option<&str>) -> PropValue {
        match self.kind {
            AttrKind::Text { default } => {
                PropValue::Text(raw.or(default).map(str::to_owned))
            }
            AttrKind::Boolean => PropValue::Flag(raw.is_some()),
            AttrKind::NullableNumber => PropValue::Number(raw.and_then(nullable_number)),
            AttrKind::Enumerated { allowed, default } => {
                let keyword = raw
                    .and_then(|raw| {
                        allowed
                            .iter()
                            .find(|candidate| candidate.eq_ignore_ascii_case(raw.trim()))
                    })
                    .copied()
                    .unwrap_or(default);
                PropValue::text(keyword)
            }
        }
    }

    /// Convert a property value to the attribute it reflects to
    ///
    /// `None` means the attribute is removed.
    pub fn to_attribute(&self, value: &PropValue) -> Option<String> {
        match value {
            PropValue::Text(text) => text.clone(),
            PropValue::Flag(true) => Some(String::new()),
            PropValue::Flag(false) => None,
            PropValue::Number(number) => number.map(format_number),
        }
    }

    /// Whether a value has the right shape for this property
    pub fn accepts(&self, value: &PropValue) -> bool {
        matches!(
            (self.kind, value),
            (AttrKind::Text { .. }, PropValue::Text(_))
                | (AttrKind::Enumerated { .. }, PropValue::Text(_))
                | (AttrKind::Boolean, PropValue::Flag(_))
                | (AttrKind::NullableNumber, PropValue::Number(_))
        )
    }

    /// Bring a written value into the property's domain
    ///
    /// Null text falls back to the declared default, so a property with a
    /// default is never null.
    pub fn normalize(&self, value: PropValue) -> PropValue {
        match (self.kind, value) {
            (AttrKind::Enumerated { .. }, PropValue::Text(text)) => {
                self.from_attribute(text.as_deref())
            }
            (AttrKind::Text { default: Some(default) }, PropValue::Text(None)) => {
                PropValue::text(default)
            }
            (AttrKind::NullableNumber, PropValue::Number(Some(number))) if !number.is_finite() => {
                PropValue::Number(None)
            }
            (_, value) => value,
        }
    }
}

/// Parse a numeric attribute, mapping empty or invalid input to `None`
pub fn nullable_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Format a number the shortest way (`5`, `1.5`)
pub fn format_number(number: f64) -> String {
    number.to_string()
}

/// Convert a camelCase property name to its kebab-case attribute name
pub fn kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPEARANCE: AttrDescriptor =
        AttrDescriptor::enumerated("appearance", "appearance", &["default", "error"], "default");

    #[test]
    fn test_nullable_number() {
        assert_eq!(nullable_number("5"), Some(5.0));
        assert_eq!(nullable_number(" 1.5 "), Some(1.5));
        assert_eq!(nullable_number("-3e2"), Some(-300.0));
        assert_eq!(nullable_number(""), None);
        assert_eq!(nullable_number("   "), None);
        assert_eq!(nullable_number("abc"), None);
        assert_eq!(nullable_number("12px"), None);
        assert_eq!(nullable_number("NaN"), None);
        assert_eq!(nullable_number("inf"), None);
    }

    #[test]
    fn test_number_reflection_never_leaks_null() {
        let step = AttrDescriptor::nullable_number("step", "step");
        assert_eq!(step.to_attribute(&PropValue::Number(None)), None);
        assert_eq!(step.to_attribute(&PropValue::Number(Some(5.0))), Some("5".into()));
        assert_eq!(step.to_attribute(&PropValue::Number(Some(0.25))), Some("0.25".into()));
    }

    #[test]
    fn test_boolean_is_presence() {
        let disabled = AttrDescriptor::boolean("disabled", "disabled");
        assert_eq!(disabled.from_attribute(Some("")), PropValue::Flag(true));
        assert_eq!(disabled.from_attribute(Some("false")), PropValue::Flag(true));
        assert_eq!(disabled.from_attribute(None), PropValue::Flag(false));
        assert_eq!(disabled.to_attribute(&PropValue::Flag(true)), Some(String::new()));
        assert_eq!(disabled.to_attribute(&PropValue::Flag(false)), None);
    }

    #[test]
    fn test_text_default() {
        let ty = AttrDescriptor::text_with_default("type", "type", "text");
        assert_eq!(ty.initial_value(), PropValue::text("text"));
        assert_eq!(ty.from_attribute(Some("email")), PropValue::text("email"));

        let name = AttrDescriptor::text("name", "name");
        assert_eq!(name.initial_value(), PropValue::Text(None));
    }

    #[test]
    fn test_null_text_normalizes_to_default() {
        let ty = AttrDescriptor::text_with_default("type", "type", "text");
        assert_eq!(ty.normalize(PropValue::Text(None)), PropValue::text("text"));
        assert_eq!(ty.normalize(PropValue::text("email")), PropValue::text("email"));

        let value = AttrDescriptor::text_with_default("value", "value", "");
        assert_eq!(value.normalize(PropValue::Text(None)), PropValue::text(""));

        let name = AttrDescriptor::text("name", "name");
        assert_eq!(name.normalize(PropValue::Text(None)), PropValue::Text(None));
    }

    #[test]
    fn test_enumerated_falls_back_to_default() {
        assert_eq!(APPEARANCE.from_attribute(Some("ERROR")), PropValue::text("error"));
        assert_eq!(APPEARANCE.from_attribute(Some("bogus")), PropValue::text("default"));
        assert_eq!(APPEARANCE.normalize(PropValue::Text(None)), PropValue::text("default"));
    }

    #[test]
    fn test_accepts_matching_kind_only() {
        let min = AttrDescriptor::nullable_number("min", "min");
        assert!(min.accepts(&PropValue::Number(None)));
        assert!(!min.accepts(&PropValue::text("3")));
        assert!(APPEARANCE.accepts(&PropValue::text("error")));
        assert_eq!(
            min.normalize(PropValue::Number(Some(f64::NAN))),
            PropValue::Number(None)
        );
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("ariaDescribedby"), "aria-describedby");
        assert_eq!(kebab_case("ariaRoledescription"), "aria-roledescription");
        assert_eq!(kebab_case("errorMessage"), "error-message");
        assert_eq!(kebab_case("value"), "value");
    }
}
