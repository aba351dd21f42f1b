//! RTE Editing Engine
//!
//! Caret positions, bookmarks, plain-text projection and structural edits
//! over an [`rte_dom::DomTree`].
//!
//! All operations go through an [`EditingContext`], which holds the tree
//! for the duration of one logical edit:
//!
//! ```ignore
//! let mut tree = rte_html::parse("<p>Hello</p>");
//! let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
//! let point = ctx.set_caret_pos(5)?;
//! ctx.insert_paragraph(point.node, Some(point.offset))?;
//! ```

mod bookmark;
mod caret;
mod cleanup;
mod config;
mod context;
mod editor;
mod enumerate;
mod error;
mod lines;
mod normalize;
mod plain_text;
mod role;
mod selection;

pub use bookmark::Bookmark;
pub use caret::{CaretMap, PlacedLine};
pub use config::{BoundaryBias, EditorConfig, HostProfile, PlaceholderStyle};
pub use context::{EditingContext, ZERO_WIDTH_SPACE};
pub use editor::{JoinOutcome, NodeRange};
pub use error::{EditError, EditResult};
pub use lines::{Line, Lines, Segment, SegmentKind};
pub use plain_text::{PlainText, plain_text};
pub use role::{AtomKind, RoleKind, is_aux_root, is_block, role_at, role_of};
pub use selection::{HostSelection, ProcessingSelection, Selection, StaticSelection};

pub use rte_dom::{BoundaryPoint, DomTree, NodeId};

/// Plain text of an HTML fragment
pub fn to_plain_text(html: &str) -> String {
    let tree = rte_html::parse(html);
    plain_text(&tree, tree.root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_plain_text() {
        assert_eq!(
            to_plain_text("<p>One</p><ul><li>Two</li></ul><p>Three<br>Four</p>"),
            "One\nTwo\nThree\nFour"
        );
    }
}
