//! Rendering binder
//!
//! Elements render into a small virtual node tree. [`render_text_field`] is
//! a pure function of a [`TextFieldView`] snapshot and a [`RenderContext`];
//! the element re-runs it from a reactive effect whenever anything it read
//! changes.
//!
//! Rendered structure:
//!
//! ```text
//! <template class="{appearance} [readonly]">
//!   <slot name="label">
//!   <slot name="description">
//!   <div class="root">
//!     <div class="root-container">
//!       <slot name="start">
//!       <input class="control" part="control" id="control" .value=…>
//!       [error + message]     <div class="end error-icon"><svg warning></div>
//!       [optional]            <div class="optional body2">label</div>
//!       [default, !optional]  <slot name="end">
//!       [valid, !optional]    <div class="end valid-icon"><svg checkmark></div>
//!     </div>
//!   </div>
//!   [error + message]         <div class="helper body1 error">message</div>
//! </template>
//! ```

use indexmap::IndexMap;

use crate::appearance::Appearance;
use crate::attr::format_number;
use crate::config::DEFAULT_OPTIONAL_LABEL;
use crate::icons::Icon;

// =============================================================================
// Node tree
// =============================================================================

/// A rendered node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Trusted markup emitted verbatim (icon paths)
    Raw(String),
}

/// A rendered element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    /// Property bindings (`.value=`), not serialized as attributes
    pub properties: IndexMap<String, String>,
    pub children: Vec<Node>,
}

const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the attribute only when a value is present
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attribute: present (empty) when `on`, absent otherwise
    pub fn flag(self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child only when `cond` holds
    pub fn child_if(self, cond: bool, child: impl FnOnce() -> Node) -> Self {
        if cond {
            self.child(child())
        } else {
            self
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// First element (depth first, including self) matching `pred`
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let element = self.as_element()?;
        if pred(element) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find(pred))
    }

    /// All elements (depth first, including self) matching `pred`
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect(pred, &mut out);
        out
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if pred(element) {
                out.push(element);
            }
            for child in &element.children {
                child.collect(pred, out);
            }
        }
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|element| element.has_class(class))
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|element| element.tag == tag)
    }

    pub fn find_slot(&self, name: &str) -> Option<&Element> {
        self.find(&|element| element.tag == "slot" && element.attribute("name") == Some(name))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.push_text(out);
                }
            }
            Node::Raw(_) => {}
        }
    }

    /// Serialize to HTML (property bindings are not part of the markup)
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Raw(markup) => out.push_str(markup),
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// Text field
// =============================================================================

/// Snapshot of every property the text field template reads
#[derive(Clone, Debug, PartialEq)]
pub struct TextFieldView {
    pub value: String,
    pub appearance: Appearance,
    pub error_message: Option<String>,
    pub optional: bool,
    pub disabled: bool,
    pub required: bool,
    pub read_only: bool,
    pub autofocus: bool,
    pub spellcheck: bool,
    pub input_type: String,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub list: Option<String>,
    pub pattern: Option<String>,
    pub autocomplete: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub precision: Option<f64>,
    pub step: Option<f64>,
    pub maxlength: Option<f64>,
    pub minlength: Option<f64>,
    pub size: Option<f64>,
    /// Set ARIA attributes, keyed by attribute name
    pub aria: IndexMap<&'static str, String>,
}

impl Default for TextFieldView {
    fn default() -> Self {
        Self {
            value: String::new(),
            appearance: Appearance::Default,
            error_message: None,
            optional: false,
            disabled: false,
            required: false,
            read_only: false,
            autofocus: false,
            spellcheck: false,
            input_type: "text".to_string(),
            name: None,
            placeholder: None,
            list: None,
            pattern: None,
            autocomplete: None,
            min: None,
            max: None,
            precision: None,
            step: None,
            maxlength: None,
            minlength: None,
            size: None,
            aria: IndexMap::new(),
        }
    }
}

impl TextFieldView {
    /// Error message, if any, treating the empty string as absent
    pub fn error_text(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|msg| !msg.is_empty())
    }

    pub fn shows_error(&self) -> bool {
        self.appearance == Appearance::Error && self.error_text().is_some()
    }
}

/// Values injected into a render pass from outside the element
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    pub dark_mode: bool,
    pub optional_label: String,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            dark_mode: false,
            optional_label: DEFAULT_OPTIONAL_LABEL.to_string(),
        }
    }
}

/// Render the text field template
pub fn render_text_field(view: &TextFieldView, ctx: &RenderContext) -> Node {
    let appearance = view.appearance;
    let shows_error = view.shows_error();

    let mut host_class = appearance.as_str().to_string();
    if view.read_only {
        host_class.push_str(" readonly");
    }

    let container = Element::new("div")
        .class("root-container")
        .child(slot("start"))
        .child(render_control(view))
        .child_if(shows_error, || {
            Element::new("div")
                .class("end error-icon")
                .child(Icon::Warning.to_node())
                .into()
        })
        .child_if(view.optional, || {
            Element::new("div")
                .class("optional body2")
                .child(Node::text(ctx.optional_label.clone()))
                .into()
        })
        .child_if(appearance == Appearance::Default && !view.optional, || slot("end"))
        .child_if(appearance == Appearance::Valid && !view.optional, || {
            Element::new("div")
                .class("end valid-icon")
                .child(Icon::valid(ctx.dark_mode).to_node())
                .into()
        });

    Element::new("template")
        .class(host_class)
        .child(slot("label"))
        .child(slot("description"))
        .child(Element::new("div").class("root").child(container))
        .child_if(shows_error, || {
            Element::new("div")
                .class("helper body1 error")
                .child(Node::text(view.error_text().unwrap_or_default()))
                .into()
        })
        .into()
}

fn slot(name: &str) -> Node {
    Element::new("slot").attr("name", name).into()
}

fn render_control(view: &TextFieldView) -> Node {
    let number = |n: Option<f64>| n.map(format_number);

    let mut input = Element::new("input")
        .class("control")
        .attr("part", "control")
        .attr("id", "control")
        .attr_opt("autocomplete", view.autocomplete.as_deref())
        .flag("autofocus", view.autofocus)
        .flag("disabled", view.disabled)
        .attr_opt("list", view.list.as_deref())
        .attr_opt("max", number(view.max))
        .attr_opt("maxlength", number(view.maxlength))
        .attr_opt("min", number(view.min))
        .attr_opt("minlength", number(view.minlength))
        .attr_opt("name", view.name.as_deref())
        .attr_opt("pattern", view.pattern.as_deref())
        .attr_opt("placeholder", view.placeholder.as_deref())
        .attr_opt("precision", number(view.precision))
        .flag("readonly", view.read_only)
        .flag("required", view.required)
        .attr_opt("size", number(view.size))
        .flag("spellcheck", view.spellcheck)
        .attr_opt("step", number(view.step))
        .attr("type", view.input_type.as_str())
        .prop("value", view.value.as_str());

    for (attribute, value) in &view.aria {
        input = input.attr(*attribute, value.as_str());
    }
    if !input.has_attribute("aria-errormessage") {
        input = input.attr_opt("aria-errormessage", view.error_text());
    }

    input.into()
}
