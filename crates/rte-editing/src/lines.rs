//! Line linearization
//!
//! Flattens a subtree into the lines a user sees. Each line belongs to the
//! innermost container holding it and is a run of segments: text nodes,
//! one-character atoms, and zero-width placeholders.
//!
//! Lines are produced lazily from an open/close walk. Inline content
//! collects in a pending run that is flushed whenever a container opens or
//! closes. A run of whitespace-only text between blocks is dropped, and a
//! container that produced no line at all still gets an empty one so the
//! caret can sit in it.

use std::collections::VecDeque;

use rte_dom::{DomTree, Edge, NodeData, NodeId, Traversal};

use crate::context::{is_blank_text, is_placeholder_text};
use crate::role::{self, AtomKind, RoleKind};

/// What a segment stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A text node; length in characters
    Text,
    /// A one-character node
    Atom(AtomKind),
    /// Zero-width filler keeping a line alive (trailing `<br>` or U+200B text)
    Placeholder,
}

/// One node's share of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub node: NodeId,
    pub kind: SegmentKind,
    /// Offset from the start of the line
    pub start: usize,
    pub len: usize,
}

impl Segment {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// A visual line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Innermost container holding the line
    pub owner: NodeId,
    pub segments: Vec<Segment>,
    pub len: usize,
}

struct Frame {
    container: NodeId,
    emitted_before: usize,
}

/// Lazy iterator over the lines of a subtree
pub struct Lines<'a> {
    tree: &'a DomTree,
    root: NodeId,
    walk: Traversal<'a>,
    frames: Vec<Frame>,
    pending: Vec<Segment>,
    emitted: usize,
    ready: VecDeque<Line>,
}

impl<'a> Lines<'a> {
    pub fn new(tree: &'a DomTree, root: NodeId) -> Self {
        Self {
            tree,
            root,
            walk: tree.traverse(root),
            frames: Vec::new(),
            pending: Vec::new(),
            emitted: 0,
            ready: VecDeque::new(),
        }
    }

    fn open(&mut self, id: NodeId) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };
        if id == self.root {
            self.frames.push(Frame { container: id, emitted_before: 0 });
        }
        match &node.data {
            NodeData::Document => {}
            NodeData::Text(text) => self.push_text(id, &text.content),
            NodeData::Element(_) => match role::role_of(node) {
                RoleKind::Atomic => {
                    if let Some(kind) = role::atom_kind(node) {
                        self.push(id, SegmentKind::Atom(kind), 1);
                    }
                    self.walk.skip_children();
                }
                RoleKind::Container if id != self.root => {
                    let owner = self.current_owner();
                    self.flush(owner, false);
                    self.frames.push(Frame { container: id, emitted_before: self.emitted });
                }
                _ => {}
            },
        }
    }

    fn close(&mut self, id: NodeId) {
        if !self.frames.last().is_some_and(|f| f.container == id) {
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let has_lines = self.emitted > frame.emitted_before;
        self.flush(frame.container, !has_lines);
        if self.emitted == frame.emitted_before {
            self.emit(frame.container, Vec::new());
        }
    }

    fn current_owner(&self) -> NodeId {
        self.frames.last().map_or(self.root, |f| f.container)
    }

    fn push_text(&mut self, id: NodeId, content: &str) {
        if is_placeholder_text(content) {
            self.push(id, SegmentKind::Placeholder, 0);
        } else {
            self.push(id, SegmentKind::Text, content.chars().count());
        }
    }

    fn push(&mut self, node: NodeId, kind: SegmentKind, len: usize) {
        self.pending.push(Segment { node, kind, start: 0, len });
    }

    fn pending_is_blank(&self) -> bool {
        self.pending.iter().all(|seg| match seg.kind {
            SegmentKind::Atom(_) => false,
            _ => self.tree.text(seg.node).is_none_or(is_blank_text),
        })
    }

    /// Turn the pending run into a line owned by `owner`
    fn flush(&mut self, owner: NodeId, keep_blank: bool) {
        if self.pending.is_empty() {
            return;
        }
        if !keep_blank && self.pending_is_blank() {
            tracing::trace!("dropping blank run of {} segments under {}", self.pending.len(), owner);
            self.pending.clear();
            return;
        }
        let segments = std::mem::take(&mut self.pending);
        self.emit(owner, segments);
    }

    fn emit(&mut self, owner: NodeId, mut segments: Vec<Segment>) {
        // A break closing the line only keeps the line open
        let last = segments
            .iter_mut()
            .rev()
            .find(|seg| !(seg.kind == SegmentKind::Text && seg.len == 0));
        if let Some(last) = last {
            if last.kind == SegmentKind::Atom(AtomKind::LineBreak) {
                last.kind = SegmentKind::Placeholder;
                last.len = 0;
            }
        }
        let mut offset = 0;
        for seg in &mut segments {
            seg.start = offset;
            offset += seg.len;
        }
        self.ready.push_back(Line { owner, segments, len: offset });
        self.emitted += 1;
    }
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(line);
            }
            match self.walk.next()? {
                Edge::Open(id) => self.open(id),
                Edge::Close(id) => self.close(id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(html: &str) -> Vec<(String, usize, usize)> {
        let tree = rte_html::parse(html);
        Lines::new(&tree, tree.root())
            .map(|line| {
                let owner = tree.tag(line.owner).unwrap_or("#document").to_string();
                (owner, line.segments.len(), line.len)
            })
            .collect()
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            lines("<p>One</p>\n<p>Three</p>"),
            vec![("p".into(), 1, 3), ("p".into(), 1, 5)]
        );
    }

    #[test]
    fn test_empty_document_has_one_line() {
        assert_eq!(lines(""), vec![("#document".into(), 0, 0)]);
    }

    #[test]
    fn test_trailing_break_is_placeholder() {
        let tree = rte_html::parse("<p>a<br></p><p><br></p>");
        let all: Vec<_> = Lines::new(&tree, tree.root()).collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].len, 1);
        assert_eq!(all[0].segments[1].kind, SegmentKind::Placeholder);
        assert_eq!(all[1].len, 0);
    }

    #[test]
    fn test_inner_break_counts() {
        let tree = rte_html::parse("<p>a<br>b</p>");
        let all: Vec<_> = Lines::new(&tree, tree.root()).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].len, 3);
        assert_eq!(all[0].segments[1].kind, SegmentKind::Atom(AtomKind::LineBreak));
    }

    #[test]
    fn test_list_item_with_nested_list() {
        let out = lines("<ul><li>a<ul><li>b</li></ul>c</li></ul>");
        assert_eq!(out, vec![("li".into(), 1, 1), ("li".into(), 1, 1), ("li".into(), 1, 1)]);
    }

    #[test]
    fn test_empty_container_gets_a_line() {
        let out = lines("<table><tr><td></td><td>x</td></tr></table>");
        assert_eq!(out, vec![("td".into(), 0, 0), ("td".into(), 1, 1)]);
    }

    #[test]
    fn test_image_atom() {
        let tree = rte_html::parse(r#"<p>a<img src="x.png">b</p>"#);
        let line = Lines::new(&tree, tree.root()).next().unwrap();
        assert_eq!(line.len, 3);
        assert_eq!(line.segments[1].kind, SegmentKind::Atom(AtomKind::Image));
        assert_eq!(line.segments[2].start, 2);
    }
}
