//! Structural editing
//!
//! Splitting and joining of inline structure, paragraph insertion and text
//! insertion. Every operation leaves the tree well-formed; callers resolve
//! caret positions again afterwards.

use std::cmp::Ordering;

use rte_dom::{BoundaryPoint, DomError, ElementData, Node, NodeData, NodeId};

use crate::context::{EditingContext, is_placeholder_text};
use crate::error::{EditError, EditResult};
use crate::role::{self, RoleKind};

/// Where two joined text runs meet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The merged text node
    pub node: NodeId,
    /// Character offset of the former seam
    pub offset: usize,
}

/// How a point in a table cell was given a paragraph to split
enum CellRun {
    /// The inline run around the point now sits in `paragraph`
    Wrapped { paragraph: NodeId, node: NodeId, offset: Option<usize> },
    /// The point lay between two blocks; an empty paragraph was inserted there
    Between(NodeId),
}

/// Endpoints of a node range, updated across removals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRange {
    pub start: NodeId,
    pub end: NodeId,
}

impl EditingContext<'_> {
    /// Split every level from `node` up to `split_parent` at a point
    ///
    /// Text is split at a character offset and elements at a child index;
    /// each ancestor up to and including `split_parent` is then cut in two
    /// with a shallow clone taking the right half. Returns the right half of
    /// `split_parent`.
    pub fn split_to_parent(&mut self, split_parent: NodeId, node: NodeId, offset: usize) -> EditResult<NodeId> {
        let levels = self.split_levels(split_parent, node, offset)?;
        Ok(levels.last().map_or(node, |&(_, right)| right))
    }

    /// Left and right halves of every level cut by a split, innermost first
    fn split_levels(&mut self, split_parent: NodeId, node: NodeId, offset: usize) -> EditResult<Vec<(NodeId, NodeId)>> {
        if !self.tree().is_ancestor_or_self(split_parent, node) {
            return Err(EditError::NotAnAncestor { ancestor: split_parent, node });
        }
        tracing::debug!("split {} up to {} at {}", node, split_parent, offset);

        let tree = self.tree_mut();
        let first = if tree.is_text(node) {
            let parts = tree.split_text(node, &[offset])?;
            (parts[0], parts[1])
        } else {
            let clone = tree.clone_shallow(node)?;
            let k = offset.min(tree.children(node).len());
            tree.move_children(node, k, clone)?;
            tree.insert_after(node, clone)?;
            (node, clone)
        };
        let mut levels = vec![first];
        if node == split_parent {
            return Ok(levels);
        }
        let (mut left, mut right) = first;
        while left != split_parent {
            let parent = tree.parent(left).ok_or(DomError::NotAChild(left))?;
            let clone = tree.clone_shallow(parent)?;
            let index = tree.index_in_parent(right).ok_or(DomError::NotAChild(right))?;
            tree.move_children(parent, index, clone)?;
            tree.insert_after(parent, clone)?;
            left = parent;
            right = clone;
            levels.push((left, right));
        }
        Ok(levels)
    }

    /// Merge the text at one edge of `node` with the adjacent text run
    ///
    /// Succeeds only when both runs sit under inline wrappers of identical
    /// structure within the same block; the wrappers are merged top-down and
    /// the two text nodes concatenated. `None` when they cannot be joined.
    pub fn join_identical_structures(&mut self, node: NodeId, join_preceding: bool) -> EditResult<Option<JoinOutcome>> {
        let tree = self.tree();
        let text = if tree.is_text(node) {
            Some(node)
        } else {
            let mut texts = tree.descendants(node).filter(|&d| tree.is_text(d));
            if join_preceding { texts.next() } else { texts.last() }
        };
        let Some(text) = text else {
            return Ok(None);
        };
        let neighbor = if join_preceding {
            tree.prev_leaf(text, self.root())
        } else {
            tree.next_leaf(text, self.root())
        };
        let Some(neighbor) = neighbor.filter(|&n| tree.is_text(n)) else {
            return Ok(None);
        };
        let (first, second) = if join_preceding { (neighbor, text) } else { (text, neighbor) };

        let (chain_a, top_a) = self.structure_chain(first);
        let (chain_b, top_b) = self.structure_chain(second);
        if top_a != top_b || chain_a.len() != chain_b.len() {
            return Ok(None);
        }
        let scope_ok = top_a.is_some_and(|top| self.is_root(top) || role::is_container(tree, top));
        if !scope_ok {
            return Ok(None);
        }
        let identical = chain_a
            .iter()
            .zip(&chain_b)
            .all(|(&a, &b)| a == b || self.same_structure(a, b));
        if !identical {
            tracing::trace!("no join: {} and {} sit under different wrappers", first, second);
            return Ok(None);
        }

        let tree = self.tree_mut();
        for (&a, &b) in chain_a.iter().rev().zip(chain_b.iter().rev()) {
            if a != b {
                tree.move_children(b, 0, a)?;
                tree.detach(b);
            }
        }
        let left = tree.text(first).unwrap_or_default().to_string();
        let right = tree.text(second).unwrap_or_default();
        let offset = left.chars().count();
        let joined = left + right;
        tree.set_text(first, joined)?;
        tree.detach(second);
        tracing::debug!("joined {} into {} at {}", second, first, offset);
        Ok(Some(JoinOutcome { node: first, offset }))
    }

    /// Unwrap inline wrappers in a node range that repeat an ancestor
    ///
    /// `<b>x<b>y</b></b>` becomes `<b>xy</b>` (as separate text nodes).
    /// Removed endpoints are replaced by their first/last child, or failing
    /// that by a neighbour or the parent.
    pub fn remove_duplicate_structures(&mut self, start: NodeId, end: NodeId) -> EditResult<NodeRange> {
        let tree = self.tree();
        let (start, end) = match tree.compare_order(start, end) {
            Ordering::Greater => (end, start),
            _ => (start, end),
        };
        let order: Vec<NodeId> = tree.descendants(self.root()).collect();
        let last = tree.last_leaf(end);
        let (Some(from), Some(to)) = (
            order.iter().position(|&n| n == start),
            order.iter().position(|&n| n == last),
        ) else {
            return Ok(NodeRange { start, end });
        };

        let mut range = NodeRange { start, end };
        let mut removed = 0;
        for &id in &order[from..=to] {
            if !role::is_structure_element(self.tree(), id) {
                continue;
            }
            let Some(elem) = self.element_data(id).cloned() else {
                continue;
            };
            let duplicate = self
                .ancestors(id)
                .any(|a| self.element_data(a).is_some_and(|ae| ae.same_structure(&elem)));
            if !duplicate {
                continue;
            }

            let tree = self.tree();
            let first_child = tree.children(id).first().copied();
            let last_child = tree.children(id).last().copied();
            let next = tree.next_sibling(id);
            let prev = tree.prev_sibling(id);
            let parent = tree.parent(id);
            self.tree_mut().remove_without_children(id)?;
            removed += 1;

            if range.start == id {
                range.start = first_child.or(next).or(parent).unwrap_or(id);
            }
            if range.end == id {
                range.end = last_child.or(prev).or(parent).unwrap_or(id);
            }
        }
        if removed > 0 {
            tracing::debug!("removed {} duplicate wrappers", removed);
        }
        Ok(range)
    }

    /// Split the block holding a point into two
    ///
    /// `offset` of `None` means the end of `node`. Returns the new block
    /// that follows the point. Loose content directly in a table cell or
    /// caption is first wrapped in a paragraph.
    pub fn insert_paragraph(&mut self, node: NodeId, offset: Option<usize>) -> EditResult<NodeId> {
        let (node, offset) = self.outside_atom(node, offset);
        let Some(mut block) = self
            .ancestors_or_self(node)
            .find(|&a| !self.is_root(a) && role::is_container(self.tree(), a))
        else {
            return Err(EditError::NoFormatScope(node));
        };

        let (mut node, mut offset) = (node, offset);
        if self.tree().get(block).is_some_and(role::is_aux_root) {
            match self.wrap_cell_run(block, node, offset)? {
                CellRun::Wrapped { paragraph, node: inner, offset: inner_offset } => {
                    (block, node, offset) = (paragraph, inner, inner_offset);
                }
                CellRun::Between(paragraph) => {
                    self.ensure_empty_line_placeholders(paragraph)?;
                    return Ok(paragraph);
                }
            }
        }

        let point_offset = offset.unwrap_or_else(|| self.tree().offset_len(node));
        let map = self.caret_map();
        let pos = map.caret_pos(
            self.tree(),
            BoundaryPoint::new(node, point_offset),
            self.config().boundary_bias,
        );
        let at_end = map.last_stop_within(block).is_none_or(|end| pos >= end);
        tracing::debug!("insert paragraph in {} at {} (end of block: {})", block, pos, at_end);

        if at_end {
            return self.append_block_after(block, node);
        }

        // Nodes on the split path that were empty beforehand stay as they are
        let tree = self.tree();
        let empty_before: Vec<NodeId> = self
            .ancestors_or_self(node)
            .take_while(|&a| a != block)
            .filter(|&a| tree.offset_len(a) == 0)
            .collect();

        let levels = self.split_levels(block, node, point_offset)?;
        let new_block = levels.last().map_or(block, |&(_, right)| right);
        for &(left, right) in levels.iter().take(levels.len().saturating_sub(1)) {
            if !empty_before.contains(&left) {
                self.prune_vacated(left);
            }
            self.prune_vacated(right);
        }
        self.ensure_leading_line(new_block)?;
        self.ensure_empty_line_placeholders(block)?;
        self.ensure_empty_line_placeholders(new_block)?;
        Ok(new_block)
    }

    /// Insert characters at a point; returns the point just after them
    pub fn insert_text(&mut self, node: NodeId, offset: usize, text: &str) -> EditResult<BoundaryPoint> {
        let (node, offset) = self.outside_atom(node, Some(offset));
        let offset = offset.unwrap_or(0);
        let (target, local) = self.text_target(node, offset)?;

        let tree = self.tree_mut();
        let content = tree.text(target).unwrap_or_default().to_string();
        let inserted = text.chars().count();
        if is_placeholder_text(&content) {
            tree.set_text(target, text)?;
            tracing::debug!("replaced placeholder {} with {} chars", target, inserted);
            return Ok(BoundaryPoint::new(target, inserted));
        }

        let byte = match tree.get(target).map(|n| &n.data) {
            Some(NodeData::Text(data)) => data.byte_index(local),
            _ => content.len(),
        };
        let mut updated = content;
        updated.insert_str(byte, text);
        tree.set_text(target, updated)?;
        tracing::debug!("inserted {} chars into {} at {}", inserted, target, local);
        Ok(BoundaryPoint::new(target, local + inserted))
    }

    /// Text node and character offset to insert at, creating one if needed
    fn text_target(&mut self, node: NodeId, offset: usize) -> EditResult<(NodeId, usize)> {
        let tree = self.tree();
        if tree.is_text(node) {
            return Ok((node, offset.min(tree.offset_len(node))));
        }
        let kids = tree.children(node);
        let k = offset.min(kids.len());
        if let Some(&before) = k.checked_sub(1).and_then(|i| kids.get(i)) {
            if tree.is_text(before) {
                return Ok((before, tree.offset_len(before)));
            }
        }
        if let Some(&after) = kids.get(k) {
            if tree.is_text(after) {
                return Ok((after, 0));
            }
        }
        let created = self.create_text("");
        self.tree_mut().insert_child(node, k, created)?;
        Ok((created, 0))
    }

    /// Re-express a point on an atom as a point in its parent
    fn outside_atom(&self, node: NodeId, offset: Option<usize>) -> (NodeId, Option<usize>) {
        let tree = self.tree();
        if role::role_at(tree, node) != RoleKind::Atomic || !tree.is_element(node) {
            return (node, offset);
        }
        match (tree.parent(node), tree.index_in_parent(node)) {
            (Some(parent), Some(index)) if !self.is_root(node) => {
                let after = offset.is_none_or(|k| k > 0);
                (parent, Some(index + usize::from(after)))
            }
            _ => (node, offset),
        }
    }

    /// Wrap the inline run around a point in a cell into a paragraph
    fn wrap_cell_run(
        &mut self,
        cell: NodeId,
        node: NodeId,
        offset: Option<usize>,
    ) -> EditResult<CellRun> {
        let tree = self.tree();
        let kids = tree.children(cell).to_vec();
        let at = if node == cell {
            offset.unwrap_or(kids.len()).min(kids.len())
        } else {
            kids.iter()
                .position(|&c| tree.is_ancestor_or_self(c, node))
                .unwrap_or(kids.len())
        };
        let inline = |i: usize| !role::is_block(tree, kids[i]);
        let mut lo = at;
        while lo > 0 && inline(lo - 1) {
            lo -= 1;
        }
        let mut hi = at;
        while hi < kids.len() && inline(hi) {
            hi += 1;
        }

        let tag = self.config().paragraph_tag.clone();
        if lo == hi {
            let paragraph = self.create_element(&tag, &[]);
            self.tree_mut().insert_child(cell, lo, paragraph)?;
            tracing::debug!("new <{}> between blocks of {}", tag, cell);
            return Ok(CellRun::Between(paragraph));
        }
        let paragraph = self.tree_mut().restructure_as_child(cell, &kids[lo..hi], &tag, &[])?;
        tracing::debug!("wrapped loose content of {} in <{}>", cell, tag);

        if node == cell {
            let offset = offset.map(|k| k.min(hi).saturating_sub(lo));
            Ok(CellRun::Wrapped { paragraph, node: paragraph, offset })
        } else {
            Ok(CellRun::Wrapped { paragraph, node, offset })
        }
    }

    /// Detach a split half left with nothing in it
    fn prune_vacated(&mut self, id: NodeId) {
        let tree = self.tree();
        let empty_text = tree.text(id).is_some_and(str::is_empty);
        let empty_wrapper = role::is_structure_element(tree, id) && tree.children(id).is_empty();
        if empty_text || empty_wrapper {
            self.tree_mut().detach(id);
        }
    }

    /// Empty block after `block`, repeating the inline wrappers around `node`
    fn append_block_after(&mut self, block: NodeId, node: NodeId) -> EditResult<NodeId> {
        let tree = self.tree();
        let inner = if tree.is_text(node) { tree.parent(node).unwrap_or(block) } else { node };
        let chain: Vec<NodeId> = self
            .ancestors_or_self(inner)
            .take_while(|&a| a != block)
            .filter(|&a| role::is_structure_element(self.tree(), a))
            .collect();

        let tree = self.tree_mut();
        let new_block = tree.clone_shallow(block)?;
        let mut host = new_block;
        for &wrapper in chain.iter().rev() {
            let clone = tree.clone_shallow(wrapper)?;
            tree.append_child(host, clone)?;
            host = clone;
        }
        tree.insert_after(block, new_block)?;
        self.ensure_empty_line_placeholders(new_block)?;
        Ok(new_block)
    }

    /// A block starting with a nested block gets an empty line in front
    fn ensure_leading_line(&mut self, block: NodeId) -> EditResult<()> {
        let tree = self.tree();
        let starts_with_block = tree
            .children(block)
            .first()
            .is_some_and(|&first| role::is_block(tree, first));
        if !starts_with_block {
            return Ok(());
        }
        if let Some(placeholder) = self.create_placeholder() {
            self.tree_mut().insert_child(block, 0, placeholder)?;
        }
        Ok(())
    }

    /// Inline wrappers above a text node, nearest first, and the node above them
    fn structure_chain(&self, text: NodeId) -> (Vec<NodeId>, Option<NodeId>) {
        let mut chain = Vec::new();
        for a in self.ancestors(text) {
            if self.is_root(a) || !role::is_structure_element(self.tree(), a) {
                return (chain, Some(a));
            }
            chain.push(a);
        }
        (chain, None)
    }

    fn element_data(&self, id: NodeId) -> Option<&ElementData> {
        self.tree().get(id).and_then(Node::as_element)
    }

    fn same_structure(&self, a: NodeId, b: NodeId) -> bool {
        match (self.element_data(a), self.element_data(b)) {
            (Some(a), Some(b)) => a.same_structure(b),
            _ => false,
        }
    }
}
