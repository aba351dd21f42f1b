//! Plain-text projection
//!
//! Lines joined by `'\n'`; atoms appear as their sentinel characters and
//! placeholders contribute nothing. Offsets in the output are caret
//! positions.

use rte_dom::{DomTree, NodeId};

use crate::context::EditingContext;
use crate::lines::{Lines, SegmentKind};

/// Lazy character stream over a subtree
pub struct PlainText<'a> {
    tree: &'a DomTree,
    lines: Lines<'a>,
    buffer: std::vec::IntoIter<char>,
    started: bool,
}

impl<'a> PlainText<'a> {
    pub fn new(tree: &'a DomTree, root: NodeId) -> Self {
        Self {
            tree,
            lines: Lines::new(tree, root),
            buffer: Vec::new().into_iter(),
            started: false,
        }
    }
}

impl Iterator for PlainText<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.buffer.next() {
                return Some(c);
            }
            let line = self.lines.next()?;
            let mut chars = Vec::with_capacity(line.len + 1);
            if self.started {
                chars.push('\n');
            }
            self.started = true;
            for seg in &line.segments {
                match seg.kind {
                    SegmentKind::Text => chars.extend(self.tree.text(seg.node).unwrap_or_default().chars()),
                    SegmentKind::Atom(kind) => chars.push(kind.sentinel()),
                    SegmentKind::Placeholder => {}
                }
            }
            self.buffer = chars.into_iter();
        }
    }
}

/// Plain text of a subtree
pub fn plain_text(tree: &DomTree, root: NodeId) -> String {
    PlainText::new(tree, root).collect()
}

impl EditingContext<'_> {
    /// Character stream of `node`'s subtree
    pub fn plain_text(&self, node: NodeId) -> PlainText<'_> {
        PlainText::new(self.tree(), node)
    }
}
