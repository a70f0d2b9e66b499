//! Element definitions
//!
//! An [`ElementDefinition`] is the registration table consulted by the
//! generic attribute dispatcher: property name → descriptor, and attribute
//! name → property. It is composed from an inherited base set, the element's
//! own properties and any number of mixins.
//!
//! ```rust
//! use tessel_elements::attr::AttrDescriptor;
//! use tessel_elements::aria::ARIA_GLOBAL_STATES_AND_PROPERTIES;
//! use tessel_elements::definition::ElementDefinition;
//!
//! const OWN: &[AttrDescriptor] = &[AttrDescriptor::boolean("readOnly", "readonly")];
//!
//! let def = ElementDefinition::builder("demo-field")
//!     .properties(OWN)
//!     .mixin(ARIA_GLOBAL_STATES_AND_PROPERTIES)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(def.by_attribute("readonly").map(|d| d.property), Some("readOnly"));
//! assert!(def.property("ariaLabel").is_some());
//! ```

use std::sync::OnceLock;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::appearance::APPEARANCE_ATTRIBUTES;
use crate::aria::{Mixin, ARIA_GLOBAL_STATES_AND_PROPERTIES};
use crate::attr::{kebab_case, AttrDescriptor};
use crate::error::DefinitionError;
use crate::text_field::{TEXT_FIELD_ATTRIBUTES, TEXT_FIELD_TAG};

/// Composed property table of an element
#[derive(Debug, Clone)]
pub struct ElementDefinition {
    tag: &'static str,
    properties: IndexMap<&'static str, AttrDescriptor>,
    attributes: FxHashMap<&'static str, &'static str>,
    mixins: SmallVec<[&'static str; 2]>,
}

impl ElementDefinition {
    pub fn builder(tag: &'static str) -> ElementDefinitionBuilder {
        ElementDefinitionBuilder {
            tag,
            sections: Vec::new(),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Look up a descriptor by property name
    pub fn property(&self, name: &str) -> Option<&AttrDescriptor> {
        self.properties.get(name)
    }

    /// Look up a descriptor by (lower case) attribute name
    pub fn by_attribute(&self, attribute: &str) -> Option<&AttrDescriptor> {
        self.attributes
            .get(attribute)
            .and_then(|property| self.properties.get(property))
    }

    /// All descriptors in declaration order (inherited, own, mixins)
    pub fn properties(&self) -> impl Iterator<Item = &AttrDescriptor> {
        self.properties.values()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn has_mixin(&self, name: &str) -> bool {
        self.mixins.iter().any(|mixin| *mixin == name)
    }
}

enum Section {
    Plain(&'static [AttrDescriptor]),
    Mixin(Mixin),
}

/// Builder that composes an [`ElementDefinition`]
pub struct ElementDefinitionBuilder {
    tag: &'static str,
    sections: Vec<Section>,
}

impl ElementDefinitionBuilder {
    /// Properties supplied by the base element
    pub fn inherit(mut self, properties: &'static [AttrDescriptor]) -> Self {
        self.sections.push(Section::Plain(properties));
        self
    }

    /// The element's own properties
    pub fn properties(mut self, properties: &'static [AttrDescriptor]) -> Self {
        self.sections.push(Section::Plain(properties));
        self
    }

    /// Graft a capability mixin onto the element
    pub fn mixin(mut self, mixin: Mixin) -> Self {
        self.sections.push(Section::Mixin(mixin));
        self
    }

    /// Compose the table, rejecting duplicate property or attribute names
    pub fn build(self) -> Result<ElementDefinition, DefinitionError> {
        let tag = self.tag;
        let mut properties = IndexMap::new();
        let mut attributes = FxHashMap::default();
        let mut mixins = SmallVec::new();

        for section in &self.sections {
            let descriptors = match section {
                Section::Plain(descriptors) => *descriptors,
                Section::Mixin(mixin) => {
                    for desc in mixin.properties {
                        let expected = kebab_case(desc.property);
                        if desc.attribute != expected {
                            return Err(DefinitionError::CaseMapping {
                                mixin: mixin.name,
                                property: desc.property,
                                attribute: desc.attribute,
                                expected,
                            });
                        }
                    }
                    mixins.push(mixin.name);
                    mixin.properties
                }
            };

            for desc in descriptors {
                if properties.insert(desc.property, *desc).is_some() {
                    return Err(DefinitionError::DuplicateProperty {
                        tag,
                        property: desc.property,
                    });
                }
                if let Some(first) = attributes.insert(desc.attribute, desc.property) {
                    return Err(DefinitionError::DuplicateAttribute {
                        tag,
                        attribute: desc.attribute,
                        first,
                        second: desc.property,
                    });
                }
            }
        }

        tracing::trace!(
            "defined <{}> with {} properties ({} mixins)",
            tag,
            properties.len(),
            mixins.len()
        );

        Ok(ElementDefinition {
            tag,
            properties,
            attributes,
            mixins,
        })
    }
}

/// Definition of the text field element, composed once per process
pub fn text_field_definition() -> &'static ElementDefinition {
    static DEFINITION: OnceLock<ElementDefinition> = OnceLock::new();
    DEFINITION.get_or_init(|| {
        ElementDefinition::builder(TEXT_FIELD_TAG)
            .inherit(APPEARANCE_ATTRIBUTES)
            .properties(TEXT_FIELD_ATTRIBUTES)
            .mixin(ARIA_GLOBAL_STATES_AND_PROPERTIES)
            .build()
            .expect("text field property tables are distinct")
    })
}
