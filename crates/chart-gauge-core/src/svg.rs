//! SVG markup serialization for a [`Scene`].

use crate::scene::{NodeId, Scene};
use std::fmt::Write;

/// Serialize the whole scene as an SVG document fragment.
#[must_use]
pub fn to_svg_string(scene: &Scene) -> String {
    let mut out = String::with_capacity(scene.len() * 64);
    write_node(scene, scene.root(), 0, &mut out);
    out
}

fn write_node(scene: &Scene, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = scene.node(id) else { return };
    let indent = "  ".repeat(depth);
    let name = node.tag.name();

    let _ = write!(out, "{indent}<{name}");
    for (attr, value) in node.attrs() {
        let _ = write!(out, " {attr}=\"{}\"", escape(value));
    }

    let text = node.text_content();
    if node.children().is_empty() && text.is_none() {
        out.push_str("/>\n");
        return;
    }
    out.push('>');
    if let Some(text) = text {
        out.push_str(&escape(text));
    }
    if !node.children().is_empty() {
        out.push('\n');
        for child in node.children() {
            write_node(scene, *child, depth + 1, out);
        }
        out.push_str(&indent);
    }
    let _ = writeln!(out, "</{name}>");
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Scene {
    /// Serialize as SVG markup. See [`to_svg_string`].
    #[must_use]
    pub fn to_svg(&self) -> String {
        to_svg_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, Tag};

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_empty_scene() {
        let svg = Scene::new(100.0, 50.0).to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("/>"));
    }

    #[test]
    fn test_nested_output() {
        let mut scene = Scene::new(100.0, 100.0);
        let g = scene.append(
            scene.root(),
            Node::new(Tag::Group).attr("transform", "translate(50,50)"),
        );
        scene.append(g, Node::new(Tag::Circle).attr("r", 10));
        scene.append(g, Node::new(Tag::Text).class("gauge-value").text("75 <ok>"));
        let svg = scene.to_svg();
        assert!(svg.contains("<g transform=\"translate(50,50)\">\n"));
        assert!(svg.contains("    <circle r=\"10\"/>\n"));
        assert!(svg.contains("<text class=\"gauge-value\">75 &lt;ok&gt;</text>"));
        assert!(svg.ends_with("</svg>\n"));
    }
}
