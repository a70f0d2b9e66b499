//! ARIA capability mixin
//!
//! A [`Mixin`] is a named, reusable property table. It is merged into an
//! element's definition once, when the definition is built, so elements
//! pick up capabilities without growing an inheritance chain.

use crate::attr::AttrDescriptor;

/// A reusable bundle of property descriptors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mixin {
    pub name: &'static str,
    pub properties: &'static [AttrDescriptor],
}

impl Mixin {
    pub fn property(&self, name: &str) -> Option<&AttrDescriptor> {
        self.properties.iter().find(|desc| desc.property == name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Global ARIA states and properties, mirrored as `aria-*` attributes
pub const ARIA_GLOBAL_STATES_AND_PROPERTIES: Mixin = Mixin {
    name: "aria-global",
    properties: &[
        AttrDescriptor::text("ariaAtomic", "aria-atomic"),
        AttrDescriptor::text("ariaBusy", "aria-busy"),
        AttrDescriptor::text("ariaControls", "aria-controls"),
        AttrDescriptor::text("ariaCurrent", "aria-current"),
        AttrDescriptor::text("ariaDescribedby", "aria-describedby"),
        AttrDescriptor::text("ariaDetails", "aria-details"),
        AttrDescriptor::text("ariaDisabled", "aria-disabled"),
        AttrDescriptor::text("ariaErrormessage", "aria-errormessage"),
        AttrDescriptor::text("ariaFlowto", "aria-flowto"),
        AttrDescriptor::text("ariaHaspopup", "aria-haspopup"),
        AttrDescriptor::text("ariaHidden", "aria-hidden"),
        AttrDescriptor::text("ariaInvalid", "aria-invalid"),
        AttrDescriptor::text("ariaKeyshortcuts", "aria-keyshortcuts"),
        AttrDescriptor::text("ariaLabel", "aria-label"),
        AttrDescriptor::text("ariaLabelledby", "aria-labelledby"),
        AttrDescriptor::text("ariaLive", "aria-live"),
        AttrDescriptor::text("ariaOwns", "aria-owns"),
        AttrDescriptor::text("ariaRelevant", "aria-relevant"),
        AttrDescriptor::text("ariaRoledescription", "aria-roledescription"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{kebab_case, AttrKind};
    use std::collections::HashSet;

    #[test]
    fn test_attributes_are_kebab_case_of_properties() {
        for desc in ARIA_GLOBAL_STATES_AND_PROPERTIES.properties {
            assert_eq!(desc.attribute, kebab_case(desc.property));
            assert!(desc.attribute.starts_with("aria-"));
            assert_eq!(desc.kind, AttrKind::Text { default: None });
        }
    }

    #[test]
    fn test_properties_are_distinct() {
        let names: HashSet<_> = ARIA_GLOBAL_STATES_AND_PROPERTIES
            .properties
            .iter()
            .map(|desc| desc.property)
            .collect();
        assert_eq!(names.len(), ARIA_GLOBAL_STATES_AND_PROPERTIES.len());
    }

    #[test]
    fn test_lookup() {
        let label = ARIA_GLOBAL_STATES_AND_PROPERTIES.property("ariaLabel");
        assert_eq!(label.map(|desc| desc.attribute), Some("aria-label"));
        assert!(ARIA_GLOBAL_STATES_AND_PROPERTIES.property("role").is_none());
    }
}
