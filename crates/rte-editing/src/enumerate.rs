//! Selection enumeration
//!
//! Lists the blocks a selection touches, in document order and without
//! duplicates, at three granularities: containers, table cells, and
//! top-level blocks.

use rte_dom::NodeId;

use crate::caret::{CaretMap, PlacedLine};
use crate::context::EditingContext;
use crate::error::EditResult;
use crate::lines::Line;
use crate::role;
use crate::selection::{ProcessingSelection, Selection};

impl EditingContext<'_> {
    /// Containers owning a line of the selection, cells and captions excluded
    ///
    /// A selection lying wholly inside cells borrows the nearest container
    /// outside them: the next one after the span, else the last one before.
    pub fn create_container_list(&self, selection: &Selection) -> EditResult<Vec<NodeId>> {
        let map = self.caret_map();
        let ps = self.resolve_selection(&map, selection);
        let tree = self.tree();
        let qualifies = |owner: NodeId| {
            role::is_container(tree, owner) && !tree.get(owner).is_some_and(role::is_aux_root)
        };
        let containers: Vec<NodeId> = distinct(spanned_lines(&map, &ps).map(|line| line.owner))
            .into_iter()
            .filter(|&owner| qualifies(owner))
            .collect();
        if !containers.is_empty() {
            return Ok(containers);
        }

        let (first, last) = span_indices(&map, &ps);
        let owners = |placed: &PlacedLine| placed.line.owner;
        let lines = map.lines();
        let substitute = lines
            .get(last + 1..)
            .unwrap_or_default()
            .iter()
            .map(owners)
            .find(|&owner| qualifies(owner))
            .or_else(|| lines[..first].iter().rev().map(owners).find(|&owner| qualifies(owner)));
        if let Some(owner) = substitute {
            tracing::trace!("no container inside the selection, using {}", owner);
        }
        Ok(substitute.into_iter().collect())
    }

    /// Table cells and captions the selection runs through
    ///
    /// A cell selection reported by the host is returned as is. Otherwise a
    /// cell only counts when its content is not itself split into blocks.
    pub fn get_aux_roots(&self, selection: &Selection) -> EditResult<Vec<NodeId>> {
        if !selection.cells.is_empty() {
            return Ok(selection.cells.clone());
        }
        let map = self.caret_map();
        let ps = self.resolve_selection(&map, selection);
        let cells = distinct(
            spanned_lines(&map, &ps).filter_map(|line| self.nearest_aux_root(line.owner)),
        )
        .into_iter()
        .filter(|&cell| !self.has_container_children(cell))
        .collect();
        Ok(cells)
    }

    /// Children of the editing root the selection touches
    pub fn create_block_list(&self, selection: &Selection) -> EditResult<Vec<NodeId>> {
        let map = self.caret_map();
        let ps = self.resolve_selection(&map, selection);
        let root = self.root();
        let nodes = spanned_lines(&map, &ps).flat_map(|line| {
            std::iter::once(line.owner).chain(line.segments.iter().map(|seg| seg.node))
        });
        let blocks = distinct(nodes.filter_map(|node| {
            self.ancestors_or_self(node)
                .find(|&a| self.tree().parent(a) == Some(root) && !self.is_root(a))
        }));
        Ok(blocks)
    }
}

/// First and last line index of the selection
fn span_indices(map: &CaretMap, ps: &ProcessingSelection) -> (usize, usize) {
    let first = map.line_index(ps.start_pos);
    let last = map.line_index(ps.end_pos);
    (first, last.max(first))
}

fn spanned_lines<'m>(map: &'m CaretMap, ps: &ProcessingSelection) -> impl Iterator<Item = &'m Line> {
    let (first, last) = span_indices(map, ps);
    map.lines()[first..=last].iter().map(|placed| &placed.line)
}

fn distinct(ids: impl Iterator<Item = NodeId>) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use rte_dom::BoundaryPoint;

    fn text_in(tree: &rte_dom::DomTree, needle: &str) -> NodeId {
        tree.descendants(tree.root())
            .find(|&d| tree.text(d) == Some(needle))
            .unwrap()
    }

    #[test]
    fn test_container_list_spans_items() {
        let mut tree = rte_html::parse("<ul><li>One</li><li>Two</li></ul><p>Three</p>");
        let one = text_in(&tree, "One");
        let three = text_in(&tree, "Three");
        let li1 = tree.parent(one).unwrap();
        let p = tree.parent(three).unwrap();
        let li2 = tree.next_sibling(li1).unwrap();
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());

        let sel = Selection::range(BoundaryPoint::new(one, 1), BoundaryPoint::new(three, 2));
        assert_eq!(ctx.create_container_list(&sel).unwrap(), vec![li1, li2, p]);
        let ul = ctx.tree().parent(li1).unwrap();
        assert_eq!(ctx.create_block_list(&sel).unwrap(), vec![ul, p]);
    }

    #[test]
    fn test_cells_are_not_containers() {
        let mut tree = rte_html::parse("<table><tr><td>A</td><td>B</td></tr></table>");
        let a = text_in(&tree, "A");
        let b = text_in(&tree, "B");
        let td_a = tree.parent(a).unwrap();
        let td_b = tree.parent(b).unwrap();
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());

        let sel = Selection::range(BoundaryPoint::new(a, 0), BoundaryPoint::new(b, 1));
        assert!(ctx.create_container_list(&sel).unwrap().is_empty());
        assert_eq!(ctx.get_aux_roots(&sel).unwrap(), vec![td_a, td_b]);
    }

    #[test]
    fn test_selection_inside_cell_borrows_next_container() {
        let mut tree = rte_html::parse("<p>P</p><table><tr><td>A</td></tr></table><p>Q</p>");
        let a = text_in(&tree, "A");
        let q = text_in(&tree, "Q");
        let p_q = tree.parent(q).unwrap();
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());

        let sel = Selection::range(BoundaryPoint::new(a, 0), BoundaryPoint::new(a, 1));
        assert_eq!(ctx.create_container_list(&sel).unwrap(), vec![p_q]);
    }

    #[test]
    fn test_selection_inside_last_cell_borrows_previous_container() {
        let mut tree = rte_html::parse("<p>P</p><table><tr><td>A</td></tr></table>");
        let p = text_in(&tree, "P");
        let a = text_in(&tree, "A");
        let p_p = tree.parent(p).unwrap();
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());

        let sel = Selection::caret(BoundaryPoint::new(a, 1));
        assert_eq!(ctx.create_container_list(&sel).unwrap(), vec![p_p]);
    }

    #[test]
    fn test_cell_selection_payload_wins() {
        let mut tree = rte_html::parse("<table><tr><td>A</td></tr></table>");
        let a = text_in(&tree, "A");
        let td = tree.parent(a).unwrap();
        let ctx = EditingContext::new(&mut tree, EditorConfig::default());
        let sel = Selection::caret(BoundaryPoint::new(a, 0)).with_cells(vec![td]);
        assert_eq!(ctx.get_aux_roots(&sel).unwrap(), vec![td]);
    }
}
