//! Selections
//!
//! [`Selection`] is what a host reports: a start point, an optional end, and
//! any whole table cells it picked. [`ProcessingSelection`] is the ordered,
//! position-resolved form the editing operations work from.

use rte_dom::{BoundaryPoint, NodeId};

use crate::caret::CaretMap;
use crate::context::EditingContext;
use crate::error::EditResult;
use crate::role::{self, RoleKind};

/// A host selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub start: BoundaryPoint,
    /// `None` for a caret, or for a whole atom when `start` is one
    pub end: Option<BoundaryPoint>,
    /// Whole cells picked by a cell selection
    pub cells: Vec<NodeId>,
}

impl Selection {
    pub fn caret(point: BoundaryPoint) -> Self {
        Self { start: point, end: None, cells: Vec::new() }
    }

    pub fn range(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self { start, end: Some(end), cells: Vec::new() }
    }

    pub fn with_cells(mut self, cells: Vec<NodeId>) -> Self {
        self.cells = cells;
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.end.is_none_or(|end| end == self.start)
    }
}

/// A selection resolved to ordered caret positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSelection {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
    pub start_pos: usize,
    pub end_pos: usize,
    /// Collapsed at the very end of the content
    pub is_eot: bool,
    pub cells: Vec<NodeId>,
}

impl ProcessingSelection {
    pub fn is_collapsed(&self) -> bool {
        self.start_pos == self.end_pos
    }

    /// Number of positions covered
    pub fn char_count(&self) -> usize {
        self.end_pos - self.start_pos
    }
}

/// Read/write access to a host's live selection
pub trait HostSelection {
    fn read(&self) -> Option<Selection>;
    fn write(&mut self, selection: Selection);
}

/// In-memory host selection
#[derive(Debug, Clone, Default)]
pub struct StaticSelection {
    current: Option<Selection>,
}

impl StaticSelection {
    pub fn new(selection: Selection) -> Self {
        Self { current: Some(selection) }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl HostSelection for StaticSelection {
    fn read(&self) -> Option<Selection> {
        self.current.clone()
    }

    fn write(&mut self, selection: Selection) {
        self.current = Some(selection);
    }
}

impl EditingContext<'_> {
    /// Resolve a selection against the current tree
    pub fn processing_selection(&self, selection: &Selection) -> EditResult<ProcessingSelection> {
        let map = self.caret_map();
        Ok(self.resolve_selection(&map, selection))
    }

    pub(crate) fn resolve_selection(&self, map: &CaretMap, selection: &Selection) -> ProcessingSelection {
        let tree = self.tree();
        let bias = self.config().boundary_bias;
        let (start, end) = match selection.end {
            Some(end) => (selection.start, end),
            None if self.is_atom_point(selection.start) => {
                let atom = selection.start.node;
                (
                    BoundaryPoint::before(tree, atom).unwrap_or(BoundaryPoint::new(atom, 0)),
                    BoundaryPoint::after(tree, atom).unwrap_or(BoundaryPoint::new(atom, 1)),
                )
            }
            None => (selection.start, selection.start),
        };

        let mut start_pos = map.caret_pos(tree, start, bias);
        let mut end_pos = map.caret_pos(tree, end, bias);
        let (mut start, mut end) = (start, end);
        if start_pos > end_pos {
            std::mem::swap(&mut start_pos, &mut end_pos);
            std::mem::swap(&mut start, &mut end);
        }
        ProcessingSelection {
            start,
            end,
            start_pos,
            end_pos,
            is_eot: start_pos == end_pos && end_pos == map.total_len(),
            cells: selection.cells.clone(),
        }
    }

    fn is_atom_point(&self, point: BoundaryPoint) -> bool {
        point.offset == 0 && role::role_at(self.tree(), point.node) == RoleKind::Atomic
            && self.tree().is_element(point.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    #[test]
    fn test_backward_selection_is_ordered() {
        let mut tree = rte_html::parse("<p>hello</p>");
        let p = tree.children(tree.root())[0];
        let text = tree.children(p)[0];
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());

        let sel = Selection::range(BoundaryPoint::new(text, 4), BoundaryPoint::new(text, 1));
        let ps = ctx.processing_selection(&sel).unwrap();
        assert_eq!((ps.start_pos, ps.end_pos), (1, 4));
        assert_eq!(ps.start, BoundaryPoint::new(text, 1));
        assert!(!ps.is_eot);
    }

    #[test]
    fn test_atom_selection_spans_atom() {
        let mut tree = rte_html::parse(r#"<p>a<img src="x">b</p>"#);
        let p = tree.children(tree.root())[0];
        let img = tree.children(p)[1];
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());

        let ps = ctx.processing_selection(&Selection::caret(BoundaryPoint::new(img, 0))).unwrap();
        assert_eq!((ps.start_pos, ps.end_pos), (1, 2));
        assert_eq!(ps.char_count(), 1);
    }

    #[test]
    fn test_end_of_text() {
        let mut tree = rte_html::parse("<p>ab</p>");
        let p = tree.children(tree.root())[0];
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());
        let ps = ctx.processing_selection(&Selection::caret(BoundaryPoint::new(p, 1))).unwrap();
        assert!(ps.is_eot);
    }

    #[test]
    fn test_static_host_selection() {
        let mut host = StaticSelection::default();
        assert!(host.read().is_none());
        let caret = Selection::caret(BoundaryPoint::new(NodeId::ROOT, 0));
        host.write(caret.clone());
        assert_eq!(host.read(), Some(caret));
        host.clear();
        assert!(host.read().is_none());
    }
}
