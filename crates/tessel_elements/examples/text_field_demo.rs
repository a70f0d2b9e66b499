//! Text Field Demo
//!
//! Scripted session against a text field: attribute writes, a consumer
//! marking the field invalid, the user typing, and a committed change.
//!
//! Run with: RUST_LOG=debug cargo run -p tessel_elements --example text_field_demo

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use tessel_core::event_types;
use tessel_elements::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = TesselConfig::from_toml_str(
        r#"
        [theme]
        color_scheme = "dark"
        "#,
    )?;
    let mut doc = Document::with_config(config);

    let field = TextField::new(&mut doc);
    field.set_attribute(&mut doc, "placeholder", Some("Amount"));
    field.set_attribute(&mut doc, "type", Some("number"));
    field.set_attribute(&mut doc, "min", Some("1"));
    field.set_attribute(&mut doc, "step", Some("not-a-number"));
    field.set_attribute(&mut doc, "autofocus", Some(""));
    field.set_attribute(&mut doc, "aria-label", Some("Amount to transfer"));

    let changes = Rc::new(Cell::new(0u32));
    let seen = changes.clone();
    doc.add_event_listener(field.id(), event_types::CHANGE, move |_| {
        seen.set(seen.get() + 1);
    });

    doc.connect(&field);
    doc.process_updates();
    println!("focused after first pass: {}", doc.focused() == Some(field.id()));
    print_fragment("initial", &doc, &field);

    // The consumer validated an empty field
    field.set_appearance(&mut doc, Appearance::Error);
    field.set_error_message(&mut doc, Some("Enter an amount"));
    print_fragment("invalid", &doc, &field);

    field.input_text(&mut doc, "42");
    field.fire_change(&mut doc);
    print_fragment("after typing", &doc, &field);

    field.set_appearance(&mut doc, Appearance::Valid);
    print_fragment("valid (dark)", &doc, &field);

    doc.set_color_scheme(doc.color_scheme().toggle());
    print_fragment("valid (light)", &doc, &field);

    println!("value = {:?}, change events = {}", field.value(&doc), changes.get());
    println!("{:#?}", doc.stats());
    Ok(())
}

fn print_fragment(label: &str, doc: &Document, field: &TextField) {
    match field.fragment(doc) {
        Some(fragment) => println!("--- {label} ---\n{}\n", fragment.to_html()),
        None => println!("--- {label} --- (not rendered)"),
    }
}
