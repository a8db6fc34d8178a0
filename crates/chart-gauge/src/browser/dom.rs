//! Live SVG elements mirroring a [`Scene`].

use chart_gauge_core::{NodeId, Patch, PatchSet, Scene};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// SVG elements created for one scene, indexed by [`NodeId`].
pub struct DomScene {
    elements: Vec<Element>,
}

impl DomScene {
    /// Create elements for every scene node and attach the root to `host`.
    ///
    /// Anything already inside `host` is removed first.
    pub fn build(document: &Document, scene: &Scene, host: &Element) -> Result<Self, JsValue> {
        host.set_inner_html("");
        let mut elements: Vec<Element> = Vec::with_capacity(scene.len());

        // arena order puts every parent before its children
        for (id, node) in scene.iter() {
            let element = document.create_element_ns(Some(SVG_NS), node.tag.name())?;
            for (name, value) in node.attrs() {
                element.set_attribute(name, value)?;
            }
            if let Some(text) = node.text_content() {
                element.set_text_content(Some(text));
            }
            let parent = match node.parent() {
                Some(parent) => elements.get(parent.index()).unwrap_or(host),
                None => host,
            };
            parent.append_child(&element)?;
            debug_assert_eq!(elements.len(), id.index());
            elements.push(element);
        }

        tracing::debug!(nodes = elements.len(), "scene attached to DOM");
        Ok(Self { elements })
    }

    /// Element for `id`, if it was built.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    /// Replay patches against the live elements.
    ///
    /// Patches for unknown nodes are skipped.
    pub fn apply(&self, patches: &PatchSet) -> Result<(), JsValue> {
        for patch in patches.iter() {
            let Some(element) = self.element(patch.node()) else {
                tracing::warn!(node = patch.node().index(), "patch for unknown node");
                continue;
            };
            match patch {
                Patch::SetAttr { name, value, .. } => element.set_attribute(name, value)?,
                Patch::SetText { text, .. } => element.set_text_content(Some(text)),
            }
        }
        Ok(())
    }

    /// Detach the root element.
    pub fn remove(&self) {
        if let Some(root) = self.elements.first() {
            root.remove();
        }
    }
}
