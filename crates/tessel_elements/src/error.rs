//! Error types for tessel_elements

use std::io;
use thiserror::Error;

/// Errors raised by typed property access on an element
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// The element does not declare this property
    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    /// The value has the wrong kind for the property
    #[error("property `{property}` expects a {expected} value, got {found}")]
    KindMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The element id is not (or no longer) part of the document
    #[error("unknown element {0}")]
    UnknownElement(String),
}

/// Errors raised while composing an element definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// Two property sets declare the same property name
    #[error("<{tag}>: property `{property}` is declared twice")]
    DuplicateProperty {
        tag: &'static str,
        property: &'static str,
    },

    /// Two properties map to the same attribute name
    #[error("<{tag}>: attribute `{attribute}` is mapped by both `{first}` and `{second}`")]
    DuplicateAttribute {
        tag: &'static str,
        attribute: &'static str,
        first: &'static str,
        second: &'static str,
    },

    /// A mixin property does not use the kebab-case form of its name as attribute
    #[error("mixin `{mixin}`: property `{property}` maps to `{attribute}`, expected `{expected}`")]
    CaseMapping {
        mixin: &'static str,
        property: &'static str,
        attribute: &'static str,
        expected: String,
    },
}

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("config parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for element operations
pub type Result<T> = std::result::Result<T, ElementError>;
