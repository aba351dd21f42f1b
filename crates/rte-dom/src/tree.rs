//! DOM Tree (arena-based allocation)
//!
//! Slots are never reused: a detached node keeps its slot with no parent, so
//! a stale handle reads a detached node rather than a different one.

use std::cmp::Ordering;

use crate::{DomError, DomResult, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of slots in the arena, detached nodes included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Detached copy of a node's own data, without children
    pub fn clone_shallow(&mut self, id: NodeId) -> DomResult<NodeId> {
        let data = self.node(id)?.data.clone();
        Ok(self.push(Node { parent: None, children: Vec::new(), data }))
    }

    // --- Navigation ---

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node; empty for unknown handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        let parent = self.parent(id)?;
        index.checked_sub(1).and_then(|i| self.child(parent, i))
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.index_in_parent(id)?;
        self.child(self.parent(id)?, index + 1)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::as_text)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::tag)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_text)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Characters for text, children otherwise
    pub fn offset_len(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, Node::offset_len)
    }

    /// Whether a node is connected to the document node
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.ancestors(id).any(|a| a == NodeId::ROOT)
    }

    /// Ancestors from the parent upwards
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        ancestor == id || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Child indices from the document node down to `id`
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(index) = self.index_in_parent(current) {
            path.push(index);
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Document order; an ancestor sorts before its descendants
    pub fn compare_order(&self, a: NodeId, b: NodeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.path(a).cmp(&self.path(b))
    }

    // --- Mutation ---

    /// Remove a node from its parent; returns the index it occupied
    pub fn detach(&mut self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        if let Some(p) = self.get_mut(parent) {
            p.children.remove(index);
        }
        if let Some(n) = self.get_mut(id) {
            n.parent = None;
        }
        Some(index)
    }

    /// Insert `child` at `index` among `parent`'s children, detaching it first
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> DomResult<NodeId> {
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if matches!(self.node(parent)?.data, NodeData::Text(_)) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        self.node(child)?;
        let mut index = index;
        if self.parent(child) == Some(parent) {
            if let Some(old) = self.index_in_parent(child) {
                if old < index {
                    index -= 1;
                }
            }
        }
        self.detach(child);
        let p = self.node_mut(parent)?;
        let index = index.min(p.children.len());
        p.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(child)
    }

    /// Append a child node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let end = self.children(parent).len();
        self.insert_child(parent, end, child)
    }

    /// Insert `new` directly before `reference`
    pub fn insert_before(&mut self, reference: NodeId, new: NodeId) -> DomResult<NodeId> {
        let parent = self.parent(reference).ok_or(DomError::NotAChild(reference))?;
        let index = self.index_in_parent(reference).ok_or(DomError::NotAChild(reference))?;
        self.insert_child(parent, index, new)
    }

    /// Insert `new` directly after `reference`
    pub fn insert_after(&mut self, reference: NodeId, new: NodeId) -> DomResult<NodeId> {
        let parent = self.parent(reference).ok_or(DomError::NotAChild(reference))?;
        let index = self.index_in_parent(reference).ok_or(DomError::NotAChild(reference))?;
        self.insert_child(parent, index + 1, new)
    }

    /// Move `from`'s children starting at `start` to the end of `to`
    pub fn move_children(&mut self, from: NodeId, start: usize, to: NodeId) -> DomResult<()> {
        let moved: Vec<NodeId> = self.children(from).iter().skip(start).copied().collect();
        for child in moved {
            self.append_child(to, child)?;
        }
        Ok(())
    }

    /// Replace a text node's content
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> DomResult<()> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(t) => {
                t.content = content.into();
                Ok(())
            }
            _ => Err(DomError::NotText(id)),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's ancestors, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
