//! HTML serialization
//!
//! Writes a subtree back out as markup. The walk uses the tree's open/close
//! traversal, so deeply nested content never recurses.

use rte_dom::{DomTree, Edge, NodeData, NodeId};

/// Elements written without an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Markup writer for editing trees
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Markup of `node`'s children
    pub fn serialize_inner(&self, tree: &DomTree, node: NodeId) -> String {
        let mut out = String::new();
        for &child in tree.children(node) {
            self.write_subtree(tree, child, &mut out);
        }
        out
    }

    /// Markup of `node` itself and its children
    pub fn serialize_outer(&self, tree: &DomTree, node: NodeId) -> String {
        let mut out = String::new();
        self.write_subtree(tree, node, &mut out);
        out
    }

    fn write_subtree(&self, tree: &DomTree, node: NodeId, out: &mut String) {
        for edge in tree.traverse(node) {
            let (id, opening) = match edge {
                Edge::Open(id) => (id, true),
                Edge::Close(id) => (id, false),
            };
            let Some(data) = tree.get(id).map(|n| &n.data) else {
                continue;
            };
            match data {
                NodeData::Text(text) if opening => write_text(&text.content, out),
                NodeData::Element(elem) if opening => {
                    out.push('<');
                    out.push_str(&elem.tag);
                    for attr in &elem.attrs {
                        out.push(' ');
                        out.push_str(&attr.name);
                        if !attr.value.is_empty() {
                            out.push_str("=\"");
                            write_attr_value(&attr.value, out);
                            out.push('"');
                        }
                    }
                    out.push('>');
                }
                NodeData::Element(elem) if !VOID_ELEMENTS.contains(&elem.tag.as_str()) => {
                    out.push_str("</");
                    out.push_str(&elem.tag);
                    out.push('>');
                }
                _ => {}
            }
        }
    }
}

fn write_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn write_attr_value(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Markup of a node's children
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node)
}

/// Markup of a node and its children
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let t = tree.create_text(text);
        tree.append_child(tree.root(), p).unwrap();
        tree.append_child(p, t).unwrap();
        (tree, p)
    }

    #[test]
    fn test_text_escaping() {
        let (tree, p) = paragraph("a <b> & \"c\"\u{a0}");
        assert_eq!(outer_html(&tree, p), "<p>a &lt;b&gt; &amp; \"c\"&nbsp;</p>");
        assert_eq!(HtmlSerializer::new().serialize_inner(&tree, p), "a &lt;b&gt; &amp; \"c\"&nbsp;");
    }

    #[test]
    fn test_attribute_escaping() {
        let mut tree = DomTree::new();
        let span = tree.create_element_with("span", &[("title", "x \"y\" & <z>"), ("hidden", "")]);
        tree.append_child(tree.root(), span).unwrap();
        assert_eq!(
            inner_html(&tree, tree.root()),
            "<span title=\"x &quot;y&quot; &amp; &lt;z&gt;\" hidden></span>"
        );
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let (mut tree, p) = paragraph("a");
        let br = tree.create_element("br");
        tree.append_child(p, br).unwrap();
        assert_eq!(inner_html(&tree, tree.root()), "<p>a<br></p>");
        assert_eq!(outer_html(&tree, br), "<br>");
    }

    #[test]
    fn test_nested_inline() {
        let (mut tree, p) = paragraph("x");
        let b = tree.create_element("b");
        let i = tree.create_element("i");
        let y = tree.create_text("y");
        tree.append_child(p, b).unwrap();
        tree.append_child(b, i).unwrap();
        tree.append_child(i, y).unwrap();
        assert_eq!(outer_html(&tree, p), "<p>x<b><i>y</i></b></p>");
    }
}
