//! Value text under the pivot.

use chart_gauge_core::{fmt_coord, format_number, Color, Node, NodeId, Patch, Scene, Tag};

/// Owns the `.gauge-value` text node.
#[derive(Debug, Clone, Default)]
pub struct ValueLabel {
    label: String,
    units: String,
    node: Option<NodeId>,
    shown: Option<String>,
}

impl ValueLabel {
    /// Create an undrawn label.
    #[must_use]
    pub fn new(label: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            units: units.into(),
            node: None,
            shown: None,
        }
    }

    /// Text for `value`: the number with its units, then the label if any.
    #[must_use]
    pub fn text_for(&self, value: f64) -> String {
        let mut text = format!("{}{}", format_number(value), self.units);
        if !self.label.is_empty() {
            text.push(' ');
            text.push_str(&self.label);
        }
        text
    }

    /// Text currently shown.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    /// The text node, once drawn.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Append the text node `offset` pixels below the pivot.
    pub fn draw(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        value: f64,
        offset: f64,
        color: Color,
    ) {
        let text = self.text_for(value);
        let node = scene.append(
            parent,
            Node::new(Tag::Text)
                .class("gauge-value")
                .attr("x", 0)
                .attr("y", fmt_coord(offset))
                .attr("text-anchor", "middle")
                .attr("alignment-baseline", "middle")
                .attr("fill", color.to_css())
                .text(text.clone()),
        );
        self.node = Some(node);
        self.shown = Some(text);
    }

    /// Replace the text for `value`. `None` before draw or when unchanged.
    pub fn update(&mut self, value: f64) -> Option<Patch> {
        let node = self.node?;
        let text = self.text_for(value);
        if self.shown.as_deref() == Some(text.as_str()) {
            return None;
        }
        self.shown = Some(text.clone());
        Some(Patch::set_text(node, text))
    }

    /// Forget the drawn node.
    pub fn unmount(&mut self) {
        self.node = None;
        self.shown = None;
    }
}
