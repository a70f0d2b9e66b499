//! Tessel Elements
//!
//! Reactive form elements built on `tessel_core`:
//!
//! - **Attribute reflection**: declarative descriptor tables bind properties to attributes
//! - **Capability mixins**: the ARIA global properties grafted onto any element definition
//! - **Appearance**: default / error / valid state with automatic recovery from error
//! - **Rendering**: a pure template function re-run by a reactive effect
//! - **Event proxying**: native `change` re-emitted at the element boundary
//!
//! # Quick Start
//!
//! ```rust
//! use tessel_elements::prelude::*;
//! use tessel_core::event_types;
//!
//! let mut doc = Document::new();
//! let field = TextField::new(&mut doc);
//! field.set_attribute(&mut doc, "min", Some("abc"));
//! field.set_autofocus(&mut doc, true);
//!
//! doc.connect(&field);
//! doc.add_event_listener(field.id(), event_types::CHANGE, |_| println!("changed"));
//!
//! assert_eq!(field.min(&doc), None);
//! doc.process_updates();
//! assert_eq!(doc.focused(), Some(field.id()));
//! ```

pub mod appearance;
pub mod aria;
pub mod attr;
pub mod config;
pub mod definition;
pub mod document;
pub mod error;
pub mod icons;
pub mod template;
pub mod text_field;
pub mod theme;

pub use appearance::Appearance;
pub use document::{CustomElement, Document, ElementId, NativeControl};
pub use error::{ConfigError, DefinitionError, ElementError, Result};
pub use text_field::TextField;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::appearance::Appearance;
    pub use crate::attr::PropValue;
    pub use crate::config::TesselConfig;
    pub use crate::document::{CustomElement, Document, ElementId};
    pub use crate::error::{ConfigError, ElementError};
    pub use crate::template::{Node, RenderContext};
    pub use crate::text_field::TextField;
    pub use crate::theme::ColorScheme;
}
