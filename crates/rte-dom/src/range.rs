//! Boundary points
//!
//! A boundary point is a (node, offset) tree position: a character offset
//! into a text node or a child index into any other node.

use std::cmp::Ordering;

use crate::{DomTree, NodeId};

/// Range boundary point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    /// The container node
    pub node: NodeId,
    /// Offset within the container (character offset for text, child index for elements)
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Point just before `node` in its parent
    pub fn before(tree: &DomTree, node: NodeId) -> Option<Self> {
        Some(Self::new(tree.parent(node)?, tree.index_in_parent(node)?))
    }

    /// Point just after `node` in its parent
    pub fn after(tree: &DomTree, node: NodeId) -> Option<Self> {
        Some(Self::new(tree.parent(node)?, tree.index_in_parent(node)? + 1))
    }

    /// Document-order comparison of two points
    pub fn compare(&self, other: &BoundaryPoint, tree: &DomTree) -> Ordering {
        if self.node == other.node {
            return self.offset.cmp(&other.offset);
        }
        // Express each point as the path to the child it precedes; a point at
        // the end of an element sorts after everything inside it.
        self.order_key(tree).cmp(&other.order_key(tree))
    }

    fn order_key(&self, tree: &DomTree) -> Vec<usize> {
        let mut key = tree.path(self.node);
        if !tree.is_text(self.node) {
            key.push(self.offset);
        }
        key
    }
}
