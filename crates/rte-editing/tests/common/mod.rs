//! Shared helpers for rte-editing integration tests

#![allow(dead_code)]

use rte_editing::{DomTree, NodeId};

/// Route engine events to the test output; filter with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// First text node with exactly this content
pub fn text_node(tree: &DomTree, content: &str) -> NodeId {
    tree.descendants(tree.root())
        .find(|&d| tree.text(d) == Some(content))
        .unwrap_or_else(|| panic!("no text node {content:?}"))
}

/// First element with this tag
pub fn element(tree: &DomTree, tag: &str) -> NodeId {
    tree.descendants(tree.root())
        .find(|&d| tree.tag(d) == Some(tag))
        .unwrap_or_else(|| panic!("no <{tag}> element"))
}
