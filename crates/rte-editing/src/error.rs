//! Editing errors
//!
//! Every variant is a misuse error: the caller passed a position or node the
//! operation cannot work on. Structural impossibilities are not errors; the
//! operations report them as `None` or an empty list instead.

use rte_dom::{DomError, NodeId};

/// Result type for editing operations
pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("inserting paragraph outside an existing format scope (at {0})")]
    NoFormatScope(NodeId),

    #[error("{ancestor} is not an ancestor of {node}")]
    NotAnAncestor { ancestor: NodeId, node: NodeId },

    #[error("caret position {pos} out of range 0..={len}")]
    PositionOutOfRange { pos: usize, len: usize },
}
