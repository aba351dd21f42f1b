//! Caret positions
//!
//! A caret position is an integer in `0..=N` where `N` is the sum of line
//! lengths plus one separator between consecutive lines. Position `p` is
//! exactly offset `p` of the plain-text projection.
//!
//! [`CaretMap`] is a snapshot of the lines of a subtree together with, for
//! every node that holds a stop, the first and last position inside it. It
//! is rebuilt on demand; no position survives a mutation of the tree.

use std::collections::HashMap;

use rte_dom::{BoundaryPoint, DomTree, NodeId};

use crate::config::BoundaryBias;
use crate::context::EditingContext;
use crate::error::{EditError, EditResult};
use crate::lines::{Line, Lines, Segment, SegmentKind};
use crate::role;

/// A line placed at its absolute position
#[derive(Debug, Clone)]
pub struct PlacedLine {
    pub start: usize,
    pub line: Line,
}

impl PlacedLine {
    pub fn end(&self) -> usize {
        self.start + self.line.len
    }
}

/// Positions of every line and segment of a subtree
#[derive(Debug, Clone)]
pub struct CaretMap {
    root: NodeId,
    lines: Vec<PlacedLine>,
    /// Segment lookup: node -> (line index, segment index)
    segments: HashMap<NodeId, (usize, usize)>,
    /// First and last stop inside each node's subtree
    stops: HashMap<NodeId, (usize, usize)>,
    total: usize,
}

impl CaretMap {
    pub fn build(tree: &DomTree, root: NodeId) -> Self {
        let mut lines = Vec::new();
        let mut segments = HashMap::new();
        let mut stops: HashMap<NodeId, (usize, usize)> = HashMap::new();
        let mut widen = |tree: &DomTree, node: NodeId, first: usize, last: usize| {
            for id in std::iter::once(node).chain(tree.ancestors(node)) {
                stops
                    .entry(id)
                    .and_modify(|(lo, hi)| {
                        *lo = (*lo).min(first);
                        *hi = (*hi).max(last);
                    })
                    .or_insert((first, last));
                if id == root {
                    break;
                }
            }
        };

        let mut start = 0;
        for (li, line) in Lines::new(tree, root).enumerate() {
            widen(tree, line.owner, start, start + line.len);
            for (si, seg) in line.segments.iter().enumerate() {
                segments.insert(seg.node, (li, si));
                widen(tree, seg.node, start + seg.start, start + seg.end());
            }
            let next = start + line.len + 1;
            lines.push(PlacedLine { start, line });
            start = next;
        }
        let total = start.saturating_sub(1);
        tracing::trace!("caret map: {} lines, {} positions", lines.len(), total + 1);
        Self { root, lines, segments, stops, total }
    }

    /// Largest valid position
    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }

    /// Index of the line containing `pos`
    pub fn line_index(&self, pos: usize) -> usize {
        self.lines.partition_point(|l| l.start <= pos).saturating_sub(1)
    }

    /// First position inside `node`'s subtree
    pub fn first_stop_within(&self, node: NodeId) -> Option<usize> {
        self.stops.get(&node).map(|&(first, _)| first)
    }

    /// Last position inside `node`'s subtree
    pub fn last_stop_within(&self, node: NodeId) -> Option<usize> {
        self.stops.get(&node).map(|&(_, last)| last)
    }

    /// Boundary point for a position
    ///
    /// At the seam between two text runs the end of the earlier one wins.
    pub fn set_caret_pos(&self, tree: &DomTree, pos: usize) -> EditResult<BoundaryPoint> {
        if pos > self.total {
            return Err(EditError::PositionOutOfRange { pos, len: self.total });
        }
        let Some(placed) = self.lines.get(self.line_index(pos)) else {
            return Ok(BoundaryPoint::new(self.root, 0));
        };
        let k = pos - placed.start;
        let segs = &placed.line.segments;

        if let Some(seg) = segs
            .iter()
            .find(|s| s.kind == SegmentKind::Text && s.start <= k && k <= s.end())
        {
            return Ok(BoundaryPoint::new(seg.node, k - seg.start));
        }
        let atom = |s: &&Segment| matches!(s.kind, SegmentKind::Atom(_));
        if let Some(seg) = segs.iter().filter(atom).find(|s| s.start == k) {
            return Ok(BoundaryPoint::before(tree, seg.node).unwrap_or(BoundaryPoint::new(seg.node, 0)));
        }
        if let Some(seg) = segs.iter().filter(atom).find(|s| s.end() == k) {
            return Ok(BoundaryPoint::after(tree, seg.node).unwrap_or(BoundaryPoint::new(seg.node, 1)));
        }
        if let Some(seg) = segs.iter().find(|s| s.kind == SegmentKind::Placeholder) {
            return Ok(if tree.is_text(seg.node) {
                BoundaryPoint::new(seg.node, 0)
            } else {
                BoundaryPoint::before(tree, seg.node).unwrap_or(BoundaryPoint::new(seg.node, 0))
            });
        }
        Ok(BoundaryPoint::new(placed.line.owner, 0))
    }

    /// Position of a boundary point
    pub fn caret_pos(&self, tree: &DomTree, point: BoundaryPoint, bias: BoundaryBias) -> usize {
        let node = point.node;
        if let Some(&(li, si)) = self.segments.get(&node) {
            let placed = &self.lines[li];
            let seg = &placed.line.segments[si];
            let local = match seg.kind {
                SegmentKind::Text => point.offset.min(seg.len),
                _ if point.offset == 0 => 0,
                _ => seg.len,
            };
            return placed.start + seg.start + local;
        }
        if tree.is_text(node) {
            // Dropped whitespace between blocks
            return match (tree.parent(node), tree.index_in_parent(node)) {
                (Some(parent), Some(index)) if node != self.root => {
                    self.element_pos(tree, parent, index, bias)
                }
                _ => 0,
            };
        }
        self.element_pos(tree, node, point.offset, bias)
    }

    fn element_pos(&self, tree: &DomTree, element: NodeId, offset: usize, bias: BoundaryBias) -> usize {
        let mut element = element;
        let mut offset = offset;
        loop {
            let kids = tree.children(element);
            let k = offset.min(kids.len());
            let next = kids[k..].iter().copied().find(|c| self.stops.contains_key(c));
            let prev = kids[..k].iter().rev().copied().find(|c| self.stops.contains_key(c));

            let prefer_backward = match (prev, next) {
                (Some(p), Some(n)) => match (role::is_block(tree, p), role::is_block(tree, n)) {
                    (true, true) => bias == BoundaryBias::Leading,
                    (false, true) => true,
                    _ => false,
                },
                (Some(_), None) => true,
                _ => false,
            };
            let forward = next.and_then(|n| self.first_stop_within(n));
            let backward = prev.and_then(|p| self.last_stop_within(p));
            let pos = if prefer_backward { backward.or(forward) } else { forward.or(backward) };
            if let Some(pos) = pos.or_else(|| self.last_stop_within(element)) {
                return pos;
            }
            if element == self.root {
                return 0;
            }
            match (tree.parent(element), tree.index_in_parent(element)) {
                (Some(parent), Some(index)) => {
                    element = parent;
                    offset = index;
                }
                _ => return 0,
            }
        }
    }
}

impl EditingContext<'_> {
    /// Fresh caret map of the editing root
    pub fn caret_map(&self) -> CaretMap {
        CaretMap::build(self.tree(), self.root())
    }

    /// Boundary point for a caret position
    pub fn set_caret_pos(&self, pos: usize) -> EditResult<BoundaryPoint> {
        self.caret_map().set_caret_pos(self.tree(), pos)
    }

    /// Caret position of a boundary point under the configured bias
    pub fn caret_pos(&self, point: BoundaryPoint) -> usize {
        self.caret_map().caret_pos(self.tree(), point, self.config().boundary_bias)
    }

    /// Largest caret position
    pub fn total_len(&self) -> usize {
        self.caret_map().total_len()
    }

    /// Whether two points denote the same caret position under `bias`
    pub fn is_exchangeable(&self, a: BoundaryPoint, b: BoundaryPoint, bias: BoundaryBias) -> bool {
        let map = self.caret_map();
        map.caret_pos(self.tree(), a, bias) == map.caret_pos(self.tree(), b, bias)
    }
}
