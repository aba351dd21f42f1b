//! DOM Node Operations
//!
//! Structure-preserving mutation primitives: element creation, text
//! splitting, wrapping, unwrapping and regrouping of sibling runs. Every
//! structural change in the editing engine goes through these.

use crate::{DomTree, NodeData, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
///
/// These signal caller misuse; none of them is recoverable locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("node {0} is not a text node")]
    NotText(NodeId),

    #[error("node {0} has no parent")]
    NotAChild(NodeId),

    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("nodes are not a contiguous run of children of {0}")]
    NotContiguous(NodeId),
}

impl DomTree {
    /// Create a detached element with attributes applied in order
    pub fn create_element_with(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            for (name, value) in attrs {
                elem.set_attr(name, *value);
            }
        }
        id
    }

    /// Split a text node at one or more character offsets
    ///
    /// Offsets are sorted and clamped to the text length. The original node
    /// is replaced by `offsets.len() + 1` new siblings covering its value
    /// contiguously, and is left detached.
    pub fn split_text(&mut self, node: NodeId, offsets: &[usize]) -> DomResult<Vec<NodeId>> {
        let content = match &self.node(node)?.data {
            NodeData::Text(t) => t.content.clone(),
            _ => return Err(DomError::NotText(node)),
        };
        let char_len = content.chars().count();
        let mut cuts: Vec<usize> = offsets.iter().map(|&o| o.min(char_len)).collect();
        cuts.sort_unstable();

        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut chars = content.chars();
        let mut prev = 0;
        for cut in cuts {
            pieces.push(chars.by_ref().take(cut - prev).collect::<String>());
            prev = cut;
        }
        pieces.push(chars.collect());

        let parent = self.parent(node);
        let index = self.detach(node);
        let mut created = Vec::with_capacity(pieces.len());
        for (i, piece) in pieces.iter().enumerate() {
            let id = self.create_text(piece);
            if let (Some(parent), Some(index)) = (parent, index) {
                self.insert_child(parent, index + i, id)?;
            }
            created.push(id);
        }
        tracing::trace!("split text {} into {} nodes", node, created.len());
        Ok(created)
    }

    /// Wrap `node` in a new element placed where `node` was
    pub fn insert_as_parent(&mut self, node: NodeId, tag: &str, attrs: &[(&str, &str)]) -> DomResult<NodeId> {
        let wrapper = self.create_element_with(tag, attrs);
        self.insert_before(node, wrapper)?;
        self.append_child(wrapper, node)?;
        Ok(wrapper)
    }

    /// Replace `node` by its children, in order, at the same position
    pub fn remove_without_children(&mut self, node: NodeId) -> DomResult<()> {
        let parent = self.parent(node).ok_or(DomError::NotAChild(node))?;
        let index = self.index_in_parent(node).ok_or(DomError::NotAChild(node))?;
        let children = self.children(node).to_vec();
        self.detach(node);
        for (i, child) in children.into_iter().enumerate() {
            self.insert_child(parent, index + i, child)?;
        }
        Ok(())
    }

    /// Move a contiguous run of `parent`'s children into a new child element
    ///
    /// The new element takes the position of the first moved node.
    pub fn restructure_as_child(
        &mut self,
        parent: NodeId,
        nodes: &[NodeId],
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> DomResult<NodeId> {
        let wrapper = self.create_element_with(tag, attrs);
        let Some(&first) = nodes.first() else {
            return self.append_child(parent, wrapper);
        };
        if self.parent(first) != Some(parent) {
            return Err(DomError::NotAChild(first));
        }
        let start = self.index_in_parent(first).ok_or(DomError::NotAChild(first))?;
        let run = self.children(parent).get(start..start + nodes.len());
        if run != Some(nodes) {
            return Err(DomError::NotContiguous(parent));
        }
        self.insert_child(parent, start, wrapper)?;
        for &node in nodes {
            self.append_child(wrapper, node)?;
        }
        Ok(wrapper)
    }
}
