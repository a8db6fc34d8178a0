//! Retained SVG scene graph.
//!
//! A [`Scene`] is an arena of SVG nodes addressed by [`NodeId`]. It is built
//! once on mount; afterwards only [`Patch`](crate::Patch) values touch it, so
//! the ids handed out at build time stay valid for the lifetime of the
//! scene and double as handles to the live DOM nodes a host creates from it.

use crate::patch::{Patch, PatchSet};
use serde::{Deserialize, Serialize};

/// Handle to a node inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Index into the scene arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// SVG element kinds used by the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    /// `<svg>` root
    Svg,
    /// `<defs>`
    Defs,
    /// `<g>`
    Group,
    /// `<path>`
    Path,
    /// `<circle>`
    Circle,
    /// `<line>`
    Line,
    /// `<text>`
    Text,
    /// `<rect>`
    Rect,
    /// `<linearGradient>`
    LinearGradient,
    /// `<stop>`
    Stop,
}

impl Tag {
    /// Element name as written in SVG markup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Defs => "defs",
            Self::Group => "g",
            Self::Path => "path",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Text => "text",
            Self::Rect => "rect",
            Self::LinearGradient => "linearGradient",
            Self::Stop => "stop",
        }
    }
}

/// A single SVG element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Element kind
    pub tag: Tag,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    /// Create an element with no attributes.
    #[must_use]
    pub const fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Set an attribute (builder form).
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value.to_string());
        self
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set or replace an attribute. Returns `true` if the value changed.
    pub fn set_attr(&mut self, name: &str, value: String) -> bool {
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            if slot.1 == value {
                return false;
            }
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
        true
    }

    /// Replace the text content. Returns `true` if it changed.
    pub fn set_text(&mut self, text: String) -> bool {
        if self.text.as_deref() == Some(text.as_str()) {
            return false;
        }
        self.text = Some(text);
        true
    }

    /// Attribute value by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in insertion order.
    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Text content, if any.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the whitespace-separated `class` list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Child node ids in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent node id (`None` for the root).
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena-backed SVG document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    /// Create a scene whose root is an `<svg>` of the given pixel size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let w = crate::format::fmt_coord(width);
        let h = crate::format::fmt_coord(height);
        let root = Node::new(Tag::Svg)
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", &w)
            .attr("height", &h)
            .attr("viewBox", format!("0 0 {w} {h}"));
        Self { nodes: vec![root] }
    }

    /// The `<svg>` root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds only its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// An unknown parent attaches the node to the root instead.
    pub fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let parent = if parent.index() < self.nodes.len() {
            parent
        } else {
            tracing::warn!(?parent, "append to unknown node, attaching to root");
            self.root()
        };
        let id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Apply a patch. Returns `true` if the scene changed.
    pub fn apply(&mut self, patch: &Patch) -> bool {
        let Some(node) = self.nodes.get_mut(patch.node().index()) else {
            tracing::debug!(?patch, "patch targets missing node");
            return false;
        };
        match patch {
            Patch::SetAttr { name, value, .. } => node.set_attr(name, value.clone()),
            Patch::SetText { text, .. } => node.set_text(text.clone()),
        }
    }

    /// Apply every patch in order. Returns the number that changed the scene.
    pub fn apply_all(&mut self, patches: &PatchSet) -> usize {
        patches.iter().filter(|p| self.apply(p)).count()
    }

    /// Ids of all nodes in document (pre-)order, starting at `from`.
    #[must_use]
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// All nodes carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.nodes[id.index()].has_class(class))
            .collect()
    }

    /// First node carrying `class`.
    #[must_use]
    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.find_by_class(class).into_iter().next()
    }

    /// Iterate over `(id, node)` pairs in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }
}
