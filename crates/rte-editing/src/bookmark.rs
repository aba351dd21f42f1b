//! Bookmarks
//!
//! Position-based snapshots of a selection. They survive any mutation that
//! keeps the plain-text projection before and inside the range unchanged,
//! and serialize as `{"startPos": .., "charCnt": ..}`.

use serde::{Deserialize, Serialize};

use crate::context::EditingContext;
use crate::error::EditResult;
use crate::selection::{HostSelection, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub start_pos: usize,
    pub char_cnt: usize,
}

impl EditingContext<'_> {
    pub fn create_bookmark(&self, selection: &Selection) -> EditResult<Bookmark> {
        let ps = self.processing_selection(selection)?;
        Ok(Bookmark { start_pos: ps.start_pos, char_cnt: ps.char_count() })
    }

    /// Selection for a bookmark, clamped to the current content
    pub fn restore_bookmark(&self, bookmark: Bookmark) -> EditResult<Selection> {
        let map = self.caret_map();
        let total = map.total_len();
        let start_pos = bookmark.start_pos.min(total);
        let end_pos = bookmark.start_pos.saturating_add(bookmark.char_cnt).min(total);
        if start_pos != bookmark.start_pos || end_pos - start_pos != bookmark.char_cnt {
            tracing::warn!(
                "bookmark {}+{} clamped to content of length {}",
                bookmark.start_pos,
                bookmark.char_cnt,
                total
            );
        }

        let start = map.set_caret_pos(self.tree(), start_pos)?;
        let end = if bookmark.char_cnt == 0 {
            None
        } else {
            Some(map.set_caret_pos(self.tree(), end_pos)?)
        };
        Ok(Selection { start, end, cells: Vec::new() })
    }

    /// Bookmark the host's current selection, if it has one
    pub fn capture_bookmark(&self, host: &impl HostSelection) -> EditResult<Option<Bookmark>> {
        host.read().map(|sel| self.create_bookmark(&sel)).transpose()
    }

    /// Put a bookmark back as the host's selection
    pub fn restore_into(&self, host: &mut impl HostSelection, bookmark: Bookmark) -> EditResult<()> {
        let selection = self.restore_bookmark(bookmark)?;
        tracing::debug!("restoring selection at {}", bookmark.start_pos);
        host.write(selection);
        Ok(())
    }
}
