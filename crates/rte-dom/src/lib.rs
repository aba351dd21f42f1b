//! RTE DOM - Document tree for the editing engine
//!
//! Arena-based tree of text runs and elements. Nodes are addressed by
//! [`NodeId`] handles; parent links are kept by the tree itself and updated
//! by every mutation, so no node ever holds a pointer to another.

mod node;
mod tree;
mod operations;
mod range;
mod traversal;

pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use operations::{DomError, DomResult};
pub use range::BoundaryPoint;
pub use traversal::{Descendants, Edge, Traversal};
pub use tree::{Ancestors, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
