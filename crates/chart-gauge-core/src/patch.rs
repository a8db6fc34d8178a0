//! Incremental updates to a mounted scene.
//!
//! After mount, controllers never rebuild nodes. They describe each visible
//! change as a [`Patch`] against a node they own, and the host replays the
//! patches against its live elements. Applying the same [`PatchSet`] to the
//! retained [`Scene`](crate::Scene) keeps the two in step.

use crate::scene::NodeId;
use serde::{Deserialize, Serialize};

/// A single mutation of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Patch {
    /// Set (or replace) an attribute
    SetAttr {
        /// Target node
        node: NodeId,
        /// Attribute name
        name: String,
        /// New value
        value: String,
    },
    /// Replace the text content
    SetText {
        /// Target node
        node: NodeId,
        /// New text
        text: String,
    },
}

impl Patch {
    /// Create an attribute patch.
    #[must_use]
    pub fn set_attr(node: NodeId, name: &str, value: impl Into<String>) -> Self {
        Self::SetAttr {
            node,
            name: name.to_string(),
            value: value.into(),
        }
    }

    /// Create a text patch.
    #[must_use]
    pub fn set_text(node: NodeId, text: impl Into<String>) -> Self {
        Self::SetText {
            node,
            text: text.into(),
        }
    }

    /// The node this patch targets.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        match self {
            Self::SetAttr { node, .. } | Self::SetText { node, .. } => *node,
        }
    }
}

/// Ordered batch of patches produced by one update or frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchSet {
    patches: Vec<Patch>,
}

impl PatchSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Number of patches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Add a patch.
    pub fn push(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    /// Append all patches from `other`.
    pub fn extend(&mut self, other: Self) {
        self.patches.extend(other.patches);
    }

    /// Iterate in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Patch> {
        self.patches.iter()
    }

    /// Patches targeting `node`.
    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = &Patch> {
        self.patches.iter().filter(move |p| p.node() == node)
    }

    /// The last value written to `name` on `node`, if any.
    #[must_use]
    pub fn last_attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.patches.iter().rev().find_map(|p| match p {
            Patch::SetAttr {
                node: n,
                name: attr,
                value,
            } if *n == node && attr == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// The last text written to `node`, if any.
    #[must_use]
    pub fn last_text(&self, node: NodeId) -> Option<&str> {
        self.patches.iter().rev().find_map(|p| match p {
            Patch::SetText { node: n, text } if *n == node => Some(text.as_str()),
            _ => None,
        })
    }
}

impl From<Patch> for PatchSet {
    fn from(patch: Patch) -> Self {
        Self {
            patches: vec![patch],
        }
    }
}

impl Extend<Patch> for PatchSet {
    fn extend<I: IntoIterator<Item = Patch>>(&mut self, iter: I) {
        self.patches.extend(iter);
    }
}

impl FromIterator<Patch> for PatchSet {
    fn from_iter<I: IntoIterator<Item = Patch>>(iter: I) -> Self {
        Self {
            patches: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PatchSet {
    type Item = Patch;
    type IntoIter = std::vec::IntoIter<Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.into_iter()
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type Item = &'a Patch;
    type IntoIter = std::slice::Iter<'a, Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.iter()
    }
}
