//! Text field element
//!
//! A single-line input wrapped behind the element boundary. Consumers drive
//! it through attributes or typed properties and read validation state back
//! through `appearance`; the field itself never validates.
//!
//! # Example
//!
//! ```rust
//! use tessel_elements::prelude::*;
//!
//! let mut doc = Document::new();
//! let field = TextField::new(&mut doc);
//! doc.connect(&field);
//!
//! field.set_appearance(&mut doc, Appearance::Error);
//! field.set_error_message(&mut doc, Some("required"));
//!
//! field.input_text(&mut doc, "abc");
//! assert_eq!(field.value(&doc), "abc");
//! assert_eq!(field.appearance(&doc), Appearance::Default);
//! ```

use std::rc::Rc;

use indexmap::IndexMap;
use tessel_core::{event_types, Event, EventData, ReactiveGraph, Signal, StateTransitions};

use crate::appearance::{appearance_events, Appearance};
use crate::aria::ARIA_GLOBAL_STATES_AND_PROPERTIES;
use crate::attr::{AttrDescriptor, PropValue};
use crate::definition::{text_field_definition, ElementDefinition};
use crate::document::{CustomElement, Document, ElementId, NativeControl};
use crate::error::{ElementError, Result};
use crate::template::{render_text_field, Node, RenderContext, TextFieldView};

/// Tag name of the text field element
pub const TEXT_FIELD_TAG: &str = "tessel-text-field";

/// Properties declared by the text field itself
pub const TEXT_FIELD_ATTRIBUTES: &[AttrDescriptor] = &[
    AttrDescriptor::text_with_default("value", "value", ""),
    AttrDescriptor::boolean("disabled", "disabled"),
    AttrDescriptor::boolean("required", "required"),
    AttrDescriptor::text("name", "name"),
    AttrDescriptor::boolean("readOnly", "readonly"),
    AttrDescriptor::boolean("autofocus", "autofocus"),
    AttrDescriptor::text("placeholder", "placeholder"),
    AttrDescriptor::text_with_default("type", "type", "text"),
    AttrDescriptor::text("list", "list"),
    AttrDescriptor::nullable_number("maxlength", "maxlength"),
    AttrDescriptor::nullable_number("minlength", "minlength"),
    AttrDescriptor::text("pattern", "pattern"),
    AttrDescriptor::nullable_number("size", "size"),
    AttrDescriptor::boolean("spellcheck", "spellcheck"),
    AttrDescriptor::boolean("optional", "optional"),
    AttrDescriptor::text("autocomplete", "autocomplete"),
    AttrDescriptor::nullable_number("min", "min"),
    AttrDescriptor::nullable_number("max", "max"),
    AttrDescriptor::nullable_number("precision", "precision"),
    AttrDescriptor::nullable_number("step", "step"),
];

#[derive(Clone, Copy, Debug)]
struct PropertyEntry {
    descriptor: AttrDescriptor,
    signal: Signal<PropValue>,
}

/// Signal per declared property, in definition order
struct PropertyStore {
    entries: IndexMap<&'static str, PropertyEntry>,
}

impl PropertyStore {
    fn get(&self, name: &str) -> Option<PropertyEntry> {
        self.entries.get(name).copied()
    }

    /// Tracked read, for use inside effects
    fn read(&self, graph: &ReactiveGraph, name: &str) -> PropValue {
        match self.entries.get(name) {
            Some(entry) => graph
                .get(entry.signal)
                .unwrap_or_else(|| entry.descriptor.initial_value()),
            None => PropValue::Text(None),
        }
    }

    fn view(&self, graph: &ReactiveGraph) -> TextFieldView {
        let text = |name: &str| self.read(graph, name).as_text().map(str::to_owned);
        let flag = |name: &str| self.read(graph, name).as_flag();
        let number = |name: &str| self.read(graph, name).as_number();

        let mut aria = IndexMap::new();
        for desc in ARIA_GLOBAL_STATES_AND_PROPERTIES.properties {
            if let Some(value) = text(desc.property) {
                aria.insert(desc.attribute, value);
            }
        }

        TextFieldView {
            value: text("value").unwrap_or_default(),
            appearance: Appearance::parse_lenient(text("appearance").as_deref()),
            error_message: text("errorMessage"),
            optional: flag("optional"),
            disabled: flag("disabled"),
            required: flag("required"),
            read_only: flag("readOnly"),
            autofocus: flag("autofocus"),
            spellcheck: flag("spellcheck"),
            input_type: text("type").unwrap_or_else(|| "text".to_string()),
            name: text("name"),
            placeholder: text("placeholder"),
            list: text("list"),
            pattern: text("pattern"),
            autocomplete: text("autocomplete"),
            min: number("min"),
            max: number("max"),
            precision: number("precision"),
            step: number("step"),
            maxlength: number("maxlength"),
            minlength: number("minlength"),
            size: number("size"),
            aria,
        }
    }
}

macro_rules! text_properties {
    ($($prop:literal => $getter:ident, $setter:ident;)*) => {
        $(
            pub fn $getter(&self, doc: &Document) -> Option<String> {
                self.read(doc, $prop).as_text().map(str::to_owned)
            }

            pub fn $setter(&self, doc: &mut Document, value: Option<&str>) {
                self.write(doc, $prop, PropValue::Text(value.map(str::to_owned)));
            }
        )*
    };
}

macro_rules! flag_properties {
    ($($prop:literal => $getter:ident, $setter:ident;)*) => {
        $(
            pub fn $getter(&self, doc: &Document) -> bool {
                self.read(doc, $prop).as_flag()
            }

            pub fn $setter(&self, doc: &mut Document, on: bool) {
                self.write(doc, $prop, PropValue::Flag(on));
            }
        )*
    };
}

macro_rules! number_properties {
    ($($prop:literal => $getter:ident, $setter:ident;)*) => {
        $(
            pub fn $getter(&self, doc: &Document) -> Option<f64> {
                self.read(doc, $prop).as_number()
            }

            pub fn $setter(&self, doc: &mut Document, value: Option<f64>) {
                self.write(doc, $prop, PropValue::Number(value));
            }
        )*
    };
}

/// Handle to a text field living in a [`Document`]
#[derive(Clone)]
pub struct TextField {
    id: ElementId,
    props: Rc<PropertyStore>,
}

impl TextField {
    /// Create a disconnected text field with every property at its default
    pub fn new(doc: &mut Document) -> Self {
        let definition = text_field_definition();
        let id = doc.create_element(definition.tag());
        let entries = definition
            .properties()
            .map(|descriptor| {
                let signal = doc.reactive_mut().create_signal(descriptor.initial_value());
                (
                    descriptor.property,
                    PropertyEntry {
                        descriptor: *descriptor,
                        signal,
                    },
                )
            })
            .collect();

        Self {
            id,
            props: Rc::new(PropertyStore { entries }),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    // =========================================================================
    // GENERIC PROPERTY ACCESS
    // =========================================================================

    /// Read a property by name
    pub fn property(&self, doc: &Document, name: &str) -> Result<PropValue> {
        let entry = self
            .props
            .get(name)
            .ok_or_else(|| ElementError::UnknownProperty(name.to_string()))?;
        doc.reactive()
            .get_untracked(entry.signal)
            .ok_or_else(|| ElementError::UnknownElement(format!("{:?}", self.id)))
    }

    /// Write a property by name, reflecting it to its attribute
    pub fn set_property(&self, doc: &mut Document, name: &str, value: PropValue) -> Result<()> {
        let entry = self
            .props
            .get(name)
            .ok_or_else(|| ElementError::UnknownProperty(name.to_string()))?;
        if !entry.descriptor.accepts(&value) {
            return Err(ElementError::KindMismatch {
                property: name.to_string(),
                expected: entry.descriptor.kind.name(),
                found: value.kind_name(),
            });
        }
        doc.batch(|doc| self.commit(doc, entry, value, true));
        Ok(())
    }

    /// Set (`Some`) or remove (`None`) a host attribute
    pub fn set_attribute(&self, doc: &mut Document, name: &str, value: Option<&str>) {
        doc.set_attribute(self, name, value);
    }

    fn read(&self, doc: &Document, name: &str) -> PropValue {
        match self.props.get(name) {
            Some(entry) => doc
                .reactive()
                .get_untracked(entry.signal)
                .unwrap_or_else(|| entry.descriptor.initial_value()),
            None => PropValue::Text(None),
        }
    }

    fn write(&self, doc: &mut Document, name: &str, value: PropValue) {
        if let Some(entry) = self.props.get(name) {
            doc.batch(|doc| self.commit(doc, entry, value, true));
        }
    }

    fn commit(&self, doc: &mut Document, entry: PropertyEntry, value: PropValue, reflect: bool) {
        let cleared = value == PropValue::Text(None);
        let value = entry.descriptor.normalize(value);
        if cleared && value != PropValue::Text(None) {
            tracing::debug!(
                "{}: {} cleared, reset to {}",
                TEXT_FIELD_TAG,
                entry.descriptor.property,
                value
            );
        }
        if doc.reactive().get_untracked(entry.signal).as_ref() == Some(&value) {
            return;
        }

        tracing::trace!("{}.{} = {}", TEXT_FIELD_TAG, entry.descriptor.property, value);
        doc.reactive_mut().set(entry.signal, value.clone());
        if reflect {
            doc.reflect_attribute(
                self.id,
                entry.descriptor.attribute,
                entry.descriptor.to_attribute(&value),
            );
        }
        self.property_changed(doc, entry, &value);
    }

    fn property_changed(&self, doc: &mut Document, entry: PropertyEntry, value: &PropValue) {
        if entry.descriptor.property != "value" {
            return;
        }
        let text = value.as_text().unwrap_or_default();
        if let Some(control) = doc.control_mut(self.id) {
            if control.value != text {
                control.value = text.to_string();
            }
        }
    }

    // =========================================================================
    // TYPED PROPERTIES
    // =========================================================================

    /// Current value, never null
    pub fn value(&self, doc: &Document) -> String {
        self.read(doc, "value").as_text().unwrap_or_default().to_string()
    }

    /// Set the value; `None` resets it to the empty string
    pub fn set_value(&self, doc: &mut Document, value: Option<&str>) {
        self.write(doc, "value", PropValue::Text(value.map(str::to_owned)));
    }

    pub fn appearance(&self, doc: &Document) -> Appearance {
        Appearance::parse_lenient(self.read(doc, "appearance").as_text())
    }

    pub fn set_appearance(&self, doc: &mut Document, appearance: Appearance) {
        self.write(doc, "appearance", PropValue::text(appearance.as_str()));
    }

    text_properties! {
        "errorMessage" => error_message, set_error_message;
        "type" => input_type, set_input_type;
        "name" => name, set_name;
        "placeholder" => placeholder, set_placeholder;
        "list" => list, set_list;
        "pattern" => pattern, set_pattern;
        "autocomplete" => autocomplete, set_autocomplete;
    }

    flag_properties! {
        "disabled" => disabled, set_disabled;
        "required" => required, set_required;
        "readOnly" => read_only, set_read_only;
        "autofocus" => autofocus, set_autofocus;
        "spellcheck" => spellcheck, set_spellcheck;
        "optional" => optional, set_optional;
    }

    number_properties! {
        "min" => min, set_min;
        "max" => max, set_max;
        "precision" => precision, set_precision;
        "step" => step, set_step;
        "maxlength" => maxlength, set_maxlength;
        "minlength" => minlength, set_minlength;
        "size" => size, set_size;
    }

    // =========================================================================
    // CONTROL EVENTS
    // =========================================================================

    /// Handle an event fired by the inner native control
    ///
    /// `input` updates `value` (and may clear the error state); `change` is
    /// re-emitted at the element boundary exactly once, composed or not.
    /// Other composed events also reach the boundary on their own.
    pub fn dispatch_control_event(&self, doc: &mut Document, event: &Event) {
        match event.event_type {
            event_types::INPUT => self.handle_text_input(doc, event),
            event_types::CHANGE => self.handle_change(doc),
            _ => {}
        }
        // `change` only crosses the boundary through `handle_change`
        if event.composed && event.event_type != event_types::CHANGE {
            doc.dispatch_event(self.id, event);
        }
    }

    /// Simulate the user typing so that the control holds `text`
    pub fn input_text(&self, doc: &mut Document, text: &str) {
        self.dispatch_control_event(doc, &Event::input(text));
    }

    /// Simulate the control committing its value
    pub fn fire_change(&self, doc: &mut Document) {
        self.dispatch_control_event(doc, &Event::change());
    }

    fn handle_text_input(&self, doc: &mut Document, event: &Event) {
        if let EventData::TextInput { text } = &event.data {
            if let Some(control) = doc.control_mut(self.id) {
                control.value.clone_from(text);
            }
        }
        let Some(text) = doc.control(self.id).map(|control| control.value.clone()) else {
            tracing::warn!("{}: input before the control was rendered", TEXT_FIELD_TAG);
            return;
        };

        doc.batch(|doc| {
            let recovers = !text.is_empty();
            self.set_value(doc, Some(&text));
            if recovers {
                let mut appearance = self.appearance(doc);
                if appearance.apply(appearance_events::TEXT_ENTERED) {
                    tracing::debug!("{}: user input cleared the error state", TEXT_FIELD_TAG);
                    self.set_appearance(doc, appearance);
                }
            }
        });
    }

    fn handle_change(&self, doc: &mut Document) {
        tracing::debug!("{}: forwarding change across the boundary", TEXT_FIELD_TAG);
        doc.dispatch_event(self.id, &Event::change());
    }

    // =========================================================================
    // CONVENIENCE
    // =========================================================================

    pub fn control<'a>(&self, doc: &'a Document) -> Option<&'a NativeControl> {
        doc.control(self.id)
    }

    /// Latest rendered fragment
    pub fn fragment(&self, doc: &Document) -> Option<Node> {
        doc.fragment(self.id)
    }

    pub fn focus(&self, doc: &mut Document) -> bool {
        doc.focus(self.id)
    }

    /// Disconnect the element and release its signals
    pub fn destroy(self, doc: &mut Document) {
        doc.disconnect(&self);
        for entry in self.props.entries.values() {
            doc.reactive_mut().dispose_signal(entry.signal);
        }
        doc.remove_element(self.id);
    }
}

impl CustomElement for TextField {
    fn id(&self) -> ElementId {
        self.id
    }

    fn definition(&self) -> &'static ElementDefinition {
        text_field_definition()
    }

    fn connected_callback(&self, doc: &mut Document) {
        doc.ensure_control(self.id);
        let value = self.value(doc);
        if let Some(control) = doc.control_mut(self.id) {
            control.value = value;
        }

        if !doc.has_render_effect(self.id) {
            if let Some(slot) = doc.render_slot(self.id) {
                let props = Rc::clone(&self.props);
                let scheme = doc.color_scheme_signal();
                let optional_label = doc.config().text_field.optional_label.clone();

                let effect = doc.reactive_mut().create_effect(move |graph| {
                    let view = props.view(graph);
                    let ctx = RenderContext {
                        dark_mode: graph.get(scheme).is_some_and(|scheme| scheme.is_dark()),
                        optional_label: optional_label.clone(),
                    };
                    let fragment = render_text_field(&view, &ctx);

                    let mut slot = slot.borrow_mut();
                    slot.fragment = Some(fragment);
                    slot.passes += 1;
                });
                doc.set_render_effect(self.id, effect);
            }
        }

        if self.autofocus(doc) {
            tracing::debug!("{}: autofocus scheduled after render", TEXT_FIELD_TAG);
            let id = self.id;
            doc.queue_update(move |doc| {
                doc.focus(id);
            });
        }
    }

    fn disconnected_callback(&self, doc: &mut Document) {
        doc.dispose_render_effect(self.id);
    }

    fn attribute_changed_callback(
        &self,
        doc: &mut Document,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        if old == new {
            return;
        }
        let Some(descriptor) = self.definition().by_attribute(name) else {
            return;
        };
        let Some(entry) = self.props.get(descriptor.property) else {
            return;
        };

        let value = descriptor.from_attribute(new);
        if value == PropValue::Number(None) {
            if let Some(raw) = new.filter(|raw| !raw.trim().is_empty()) {
                tracing::debug!("{}: {}={:?} is not a number, using null", TEXT_FIELD_TAG, name, raw);
            }
        }
        doc.batch(|doc| self.commit(doc, entry, value, false));
    }
}
