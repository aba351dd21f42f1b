//! HTML5 fragment parser
//!
//! html5ever builds an RcDom; the `<body>` content is then copied into an
//! editing tree. Whitespace-only text inside list and table scaffolding is
//! dropped on the way.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use rte_dom::{DomTree, NodeId};

/// Table and list scaffolding, where whitespace-only text is never content
const SCAFFOLDING: &[&str] = &["table", "tbody", "thead", "tfoot", "tr", "ul", "ol"];

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse editable content into a fresh tree
    ///
    /// The document node of the returned tree holds what html5ever places in
    /// `<body>`; `<head>` content is discarded.
    pub fn parse(&self, html: &str) -> DomTree {
        tracing::debug!("Parsing HTML fragment ({} bytes)", html.len());

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut tree = DomTree::new();
        let root = tree.root();
        if let Some(body) = find_element(&dom.document, "body") {
            for child in body.children.borrow().iter() {
                self.convert_node(child, &mut tree, root, "body");
            }
        }

        tracing::debug!("Parsed {} nodes", tree.len());
        tree
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId, parent_tag: &str) {
        match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() && SCAFFOLDING.contains(&parent_tag) {
                    return;
                }
                let id = tree.create_text(&text);
                if tree.append_child(parent, id).is_err() {
                    tracing::warn!("dropped text under {}", parent);
                }
            }
            RcNodeData::Element { name, attrs, .. } => {
                let tag = name.local.to_ascii_lowercase();
                let id = tree.create_element(&tag);
                if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                    for attr in attrs.borrow().iter() {
                        elem.set_attr(&attr.name.local, attr.value.to_string());
                    }
                }
                if tree.append_child(parent, id).is_err() {
                    tracing::warn!("dropped <{}> under {}", tag, parent);
                    return;
                }
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id, &tag);
                }
            }
            // Comments, doctypes and processing instructions carry no editable content
            RcNodeData::Document
            | RcNodeData::Doctype { .. }
            | RcNodeData::Comment { .. }
            | RcNodeData::ProcessingInstruction { .. } => {}
        }
    }
}

/// Depth-first search for the first element with the given local name
fn find_element(handle: &Handle, local: &str) -> Option<Handle> {
    if let RcNodeData::Element { name, .. } = &handle.data {
        if &*name.local == local {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paragraphs() {
        let tree = HtmlParser::new().parse("<p>Hello</p><p>World</p>");
        let root = tree.root();
        assert_eq!(tree.children(root).len(), 2);
        let first = tree.children(root)[0];
        assert_eq!(tree.tag(first), Some("p"));
        assert_eq!(tree.text(tree.children(first)[0]), Some("Hello"));
    }

    #[test]
    fn test_table_whitespace_dropped() {
        let tree = HtmlParser::new().parse("<table>\n  <tr>\n <td>X</td>\n</tr>\n</table>");
        let table = tree.children(tree.root())[0];
        assert_eq!(tree.tag(table), Some("table"));
        // html5ever inserts the implied tbody
        let tbody = tree.children(table)[0];
        assert_eq!(tree.tag(tbody), Some("tbody"));
        let tr = tree.children(tbody)[0];
        assert_eq!(tree.children(tr).len(), 1);
    }

    #[test]
    fn test_attributes_kept() {
        let tree = HtmlParser::new().parse(r#"<p><a name="top"></a><img src="x.png"></p>"#);
        let p = tree.children(tree.root())[0];
        let anchor = tree.children(p)[0];
        assert_eq!(tree.get(anchor).unwrap().attr("name"), Some("top"));
        let img = tree.children(p)[1];
        assert_eq!(tree.get(img).unwrap().attr("src"), Some("x.png"));
    }
}
