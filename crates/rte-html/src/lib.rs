//! RTE HTML
//!
//! HTML5 parsing built on html5ever, converted into the editing tree, plus
//! the serializer used to read edited content back out.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use rte_dom::{DomTree, Node, NodeId};
pub use serializer::{HtmlSerializer, inner_html, outer_html};

/// Parse editable HTML content into a fresh tree
pub fn parse(html: &str) -> DomTree {
    HtmlParser::new().parse(html)
}

/// Serialize everything under the document node
pub fn to_html(tree: &DomTree) -> String {
    inner_html(tree, tree.root())
}
