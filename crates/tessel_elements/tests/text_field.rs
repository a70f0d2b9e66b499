//! End-to-end behavior of the text field through its public API

use std::cell::Cell;
use std::rc::Rc;

use tessel_core::{event_types, Event};
use tessel_elements::prelude::*;

fn connected_field() -> (Document, TextField) {
    let mut doc = Document::new();
    let field = TextField::new(&mut doc);
    doc.connect(&field);
    (doc, field)
}

fn counter(doc: &mut Document, field: &TextField, event_type: u32) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let handle = count.clone();
    doc.add_event_listener(field.id(), event_type, move |_| handle.set(handle.get() + 1));
    count
}

#[test]
fn value_reads_back_what_was_written() {
    let (mut doc, field) = connected_field();

    for s in ["", "a", "hello world", "  padded  ", "ünïcødé", "null"] {
        field.set_value(&mut doc, Some(s));
        assert_eq!(field.value(&doc), s);
    }
}

#[test]
fn null_value_reads_back_as_empty_string() {
    let (mut doc, field) = connected_field();

    field.set_value(&mut doc, Some("something"));
    field.set_value(&mut doc, None);
    assert_eq!(field.value(&doc), "");

    field
        .set_property(&mut doc, "value", PropValue::Text(None))
        .unwrap();
    assert_eq!(field.value(&doc), "");

    field.set_attribute(&mut doc, "value", Some("typed"));
    field.set_attribute(&mut doc, "value", None);
    assert_eq!(field.value(&doc), "");
}

#[test]
fn error_decoration_iff_error_with_message() {
    let (mut doc, field) = connected_field();

    for appearance in Appearance::ALL {
        for message in ["", "msg"] {
            field.set_appearance(&mut doc, appearance);
            field.set_error_message(&mut doc, Some(message));

            let fragment = field.fragment(&doc).unwrap();
            let expected = appearance == Appearance::Error && !message.is_empty();
            assert_eq!(
                fragment.find_by_class("error-icon").is_some(),
                expected,
                "error icon for {appearance} / {message:?}"
            );
            assert_eq!(
                fragment.find_by_class("helper").is_some(),
                expected,
                "helper text for {appearance} / {message:?}"
            );
        }
    }
}

#[test]
fn typing_recovers_from_error_only_with_text() {
    let (mut doc, field) = connected_field();
    field.set_appearance(&mut doc, Appearance::Error);
    field.set_error_message(&mut doc, Some("required"));

    field.input_text(&mut doc, "");
    assert_eq!(field.value(&doc), "");
    assert_eq!(field.appearance(&doc), Appearance::Error);

    field.input_text(&mut doc, "abc");
    assert_eq!(field.value(&doc), "abc");
    assert_eq!(field.appearance(&doc), Appearance::Default);

    let fragment = field.fragment(&doc).unwrap();
    assert!(fragment.find_by_class("helper").is_none());
    assert!(fragment.find_slot("end").is_some());
}

#[test]
fn optional_and_valid_render_one_end_decoration() {
    let (mut doc, field) = connected_field();
    field.set_optional(&mut doc, true);
    field.set_appearance(&mut doc, Appearance::Valid);

    let fragment = field.fragment(&doc).unwrap();
    let decorations = fragment.find_all(&|e| {
        e.has_class("optional") || e.has_class("valid-icon") || e.attribute("name") == Some("end")
    });
    assert_eq!(decorations.len(), 1);
    assert!(decorations[0].has_class("optional"));
}

#[test]
fn invalid_numeric_attributes_become_null() {
    let (mut doc, field) = connected_field();
    let numeric = ["min", "max", "step", "precision", "maxlength", "minlength", "size"];

    for attribute in numeric {
        for raw in ["", "   ", "abc", "1O", "--1", "NaN", "Infinity"] {
            field.set_attribute(&mut doc, attribute, Some("7"));
            field.set_attribute(&mut doc, attribute, Some(raw));
            assert_eq!(
                field.property(&doc, attribute).unwrap(),
                PropValue::Number(None),
                "{attribute}={raw:?}"
            );
        }

        let fragment = field.fragment(&doc).unwrap();
        let control = fragment.find_by_class("control").unwrap();
        assert!(!control.has_attribute(attribute), "{attribute} leaked to control");
    }

    field.set_attribute(&mut doc, "min", Some(" 2.5 "));
    assert_eq!(field.min(&doc), Some(2.5));
}

#[test]
fn native_change_is_forwarded_exactly_once() {
    let (mut doc, field) = connected_field();
    let changes = counter(&mut doc, &field, event_types::CHANGE);

    field.input_text(&mut doc, "a");
    field.input_text(&mut doc, "ab");
    assert_eq!(changes.get(), 0);

    field.fire_change(&mut doc);
    assert_eq!(changes.get(), 1);

    field.fire_change(&mut doc);
    assert_eq!(changes.get(), 2);
}

#[test]
fn composed_change_from_the_control_is_forwarded_once() {
    let (mut doc, field) = connected_field();
    let changes = counter(&mut doc, &field, event_types::CHANGE);

    let composed = Event::new(event_types::CHANGE);
    assert!(composed.composed);
    field.dispatch_control_event(&mut doc, &composed);
    assert_eq!(changes.get(), 1);

    field.dispatch_control_event(&mut doc, &Event::change());
    assert_eq!(changes.get(), 2);
}

#[test]
fn required_is_passed_to_the_control() {
    let (mut doc, field) = connected_field();
    let control = |doc: &Document| field.fragment(doc).unwrap().find_by_class("control").cloned();

    assert!(!field.required(&doc));
    assert!(!control(&doc).unwrap().has_attribute("required"));

    field.set_attribute(&mut doc, "required", Some(""));
    assert!(field.required(&doc));
    assert_eq!(control(&doc).unwrap().attribute("required"), Some(""));

    field.set_required(&mut doc, false);
    assert_eq!(doc.attribute(field.id(), "required"), None);
    assert!(!control(&doc).unwrap().has_attribute("required"));
}

#[test]
fn cleared_type_goes_back_to_text() {
    let (mut doc, field) = connected_field();

    field.set_input_type(&mut doc, Some("email"));
    assert_eq!(field.input_type(&doc).as_deref(), Some("email"));

    field.set_input_type(&mut doc, None);
    assert_eq!(field.input_type(&doc).as_deref(), Some("text"));
    assert_eq!(doc.attribute(field.id(), "type"), Some("text"));
}

#[test]
fn input_events_cross_the_boundary_on_their_own() {
    let (mut doc, field) = connected_field();
    let inputs = counter(&mut doc, &field, event_types::INPUT);

    field.input_text(&mut doc, "x");
    assert_eq!(inputs.get(), 1);
}

#[test]
fn autofocus_happens_after_the_render_pass() {
    let mut doc = Document::new();
    let field = TextField::new(&mut doc);
    field.set_autofocus(&mut doc, true);

    doc.connect(&field);
    assert!(field.fragment(&doc).is_some());
    assert_eq!(doc.focused(), None);
    assert!(!field.control(&doc).unwrap().focused);

    assert_eq!(doc.process_updates(), 1);
    assert_eq!(doc.focused(), Some(field.id()));
    assert!(field.control(&doc).unwrap().focused);
}

#[test]
fn no_focus_without_autofocus() {
    let (mut doc, field) = connected_field();
    assert_eq!(doc.process_updates(), 0);
    assert_eq!(doc.focused(), None);
    assert!(!field.control(&doc).unwrap().focused);
}

#[test]
fn instances_do_not_share_state() {
    let mut doc = Document::new();
    let first = TextField::new(&mut doc);
    let second = TextField::new(&mut doc);
    doc.connect(&first);
    doc.connect(&second);

    first.input_text(&mut doc, "one");
    first.set_appearance(&mut doc, Appearance::Valid);

    assert_eq!(second.value(&doc), "");
    assert_eq!(second.appearance(&doc), Appearance::Default);
}

#[test]
fn config_supplies_optional_label() {
    let config = TesselConfig::from_toml_str("[text_field]\noptional_label = \"Optional\"").unwrap();
    let mut doc = Document::with_config(config);
    let field = TextField::new(&mut doc);
    field.set_optional(&mut doc, true);
    doc.connect(&field);

    let fragment = field.fragment(&doc).unwrap();
    let optional = fragment.find_by_class("optional").unwrap();
    assert_eq!(Node::Element(optional.clone()).text_content(), "Optional");
}
