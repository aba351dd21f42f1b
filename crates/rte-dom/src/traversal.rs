//! Tree traversal
//!
//! Explicit-stack walks over a subtree, so deep documents never recurse.
//!
//! [`Traversal`] reports each element twice (on entry and on exit), which is
//! what block-aware walks need; [`Descendants`] is the plain pre-order list.

use crate::{DomTree, NodeId};

/// Traversal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Entering a node, before its children
    Open(NodeId),
    /// Leaving a node, after its children
    Close(NodeId),
}

/// Open/close walk of a subtree, root included
pub struct Traversal<'a> {
    tree: &'a DomTree,
    /// Pending events, next on top
    stack: Vec<Edge>,
}

impl<'a> Traversal<'a> {
    pub fn new(tree: &'a DomTree, root: NodeId) -> Self {
        Self { tree, stack: vec![Edge::Open(root)] }
    }

    /// Skip the children of the node just opened; its close event still follows
    pub fn skip_children(&mut self) {
        while let Some(Edge::Open(_)) = self.stack.last() {
            self.stack.pop();
        }
    }
}

impl Iterator for Traversal<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        let edge = self.stack.pop()?;
        if let Edge::Open(id) = edge {
            self.stack.push(Edge::Close(id));
            for &child in self.tree.children(id).iter().rev() {
                self.stack.push(Edge::Open(child));
            }
        }
        Some(edge)
    }
}

/// Pre-order iterator over a subtree, root included
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

impl DomTree {
    /// Pre-order walk of `root` and everything below it
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants { tree: self, stack: vec![root] }
    }

    /// Open/close walk of `root` and everything below it
    pub fn traverse(&self, root: NodeId) -> Traversal<'_> {
        Traversal::new(self, root)
    }

    /// Next node in pre-order after `id`'s subtree, bounded by `scope`
    pub fn next_after_subtree(&self, id: NodeId, scope: NodeId) -> Option<NodeId> {
        let mut current = id;
        while current != scope {
            if let Some(next) = self.next_sibling(current) {
                return Some(next);
            }
            current = self.parent(current)?;
        }
        None
    }

    /// Previous leaf in document order, bounded by `scope`
    pub fn prev_leaf(&self, id: NodeId, scope: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            if current == scope {
                return None;
            }
            if let Some(prev) = self.prev_sibling(current) {
                return Some(self.last_leaf(prev));
            }
            current = self.parent(current)?;
        }
    }

    /// Next leaf in document order, bounded by `scope`
    pub fn next_leaf(&self, id: NodeId, scope: NodeId) -> Option<NodeId> {
        self.next_after_subtree(id, scope).map(|next| self.first_leaf(next))
    }

    /// Deepest first descendant (or `id` itself when childless)
    pub fn first_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(&first) = self.children(current).first() {
            current = first;
        }
        current
    }

    /// Deepest last descendant (or `id` itself when childless)
    pub fn last_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(&last) = self.children(current).last() {
            current = last;
        }
        current
    }
}
