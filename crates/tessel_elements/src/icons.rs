//! Decoration icons
//!
//! Lucide path data, wrapped in an `<svg>` node when rendered.

use crate::template::{Element, Node};

/// triangle alert
pub const TRIANGLE_ALERT: &str = r#"<path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3"/><path d="M12 9v4"/><path d="M12 17h.01"/>"#;

/// check
pub const CHECK: &str = r#"<path d="M20 6 9 17l-5-5"/>"#;

/// circle check
pub const CIRCLE_CHECK: &str = r#"<circle cx="12" cy="12" r="10"/><path d="m9 12 2 2 4-4"/>"#;

/// Icons used by form decorations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Warning,
    Checkmark,
    CheckmarkWithCircle,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Warning => "warning",
            Icon::Checkmark => "checkmark",
            Icon::CheckmarkWithCircle => "checkmark-with-circle",
        }
    }

    pub fn path_data(&self) -> &'static str {
        match self {
            Icon::Warning => TRIANGLE_ALERT,
            Icon::Checkmark => CHECK,
            Icon::CheckmarkWithCircle => CIRCLE_CHECK,
        }
    }

    /// Valid-state icon for the active color scheme
    pub fn valid(dark_mode: bool) -> Self {
        if dark_mode {
            Icon::CheckmarkWithCircle
        } else {
            Icon::Checkmark
        }
    }

    pub fn to_node(&self) -> Node {
        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("viewBox", "0 0 24 24")
            .attr("fill", "none")
            .attr("stroke", "currentColor")
            .attr("stroke-width", "2")
            .attr("stroke-linecap", "round")
            .attr("stroke-linejoin", "round")
            .attr("data-icon", self.name())
            .child(Node::Raw(self.path_data().to_string()))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_icon_follows_scheme() {
        assert_eq!(Icon::valid(false), Icon::Checkmark);
        assert_eq!(Icon::valid(true), Icon::CheckmarkWithCircle);
    }

    #[test]
    fn test_icon_node() {
        let node = Icon::Warning.to_node();
        let svg = node.as_element().unwrap();
        assert_eq!(svg.tag, "svg");
        assert_eq!(svg.attribute("data-icon"), Some("warning"));
        assert!(node.to_html().contains("M12 9v4"));
    }
}
