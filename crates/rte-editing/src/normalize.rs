//! List and table repair
//!
//! Brings scaffolding back into the shape the caret model expects after
//! paste or structural edits: list children are items, nested lists live
//! inside items, rows live inside row groups.

use rte_dom::{Node, NodeId};

use crate::context::{EditingContext, is_blank_text};
use crate::error::EditResult;

const LISTS: &[&str] = &["ul", "ol"];
const ROW_GROUPS: &[&str] = &["thead", "tbody", "tfoot"];
const CELLS: &[&str] = &["td", "th"];

impl EditingContext<'_> {
    /// Repair every list under `node` (itself included)
    pub fn normalize_lists(&mut self, node: NodeId) -> EditResult<()> {
        let lists: Vec<NodeId> = self
            .tree()
            .descendants(node)
            .filter(|&d| self.is_tag_in(d, LISTS))
            .collect();
        tracing::debug!("normalizing {} lists under {}", lists.len(), node);
        for list in lists {
            // Merged into an earlier list
            if !self.tree().is_ancestor_or_self(node, list) {
                continue;
            }
            self.merge_following_lists(list)?;
            self.rehome_nested_lists(list)?;
            self.wrap_loose_items(list)?;
        }
        Ok(())
    }

    /// Repair a table's row groups and give empty cells a placeholder
    pub fn normalize_table(&mut self, table: NodeId) -> EditResult<()> {
        if self.tree().tag(table) != Some("table") {
            tracing::trace!("normalize_table called on {}, not a table", table);
            return Ok(());
        }

        // Rows directly under the table go into a body
        for run in self.child_runs(table, |ctx, c| ctx.is_tag_in(c, &["tr"])) {
            self.tree_mut().restructure_as_child(table, &run, "tbody", &[])?;
            tracing::debug!("wrapped {} loose rows of {} in <tbody>", run.len(), table);
        }

        // Header group ahead of the bodies
        let sections: Vec<NodeId> = self
            .tree()
            .children(table)
            .iter()
            .copied()
            .filter(|&c| self.is_tag_in(c, ROW_GROUPS))
            .collect();
        let first_section = sections.first().copied();
        let header = sections.iter().copied().find(|&s| self.tree().tag(s) == Some("thead"));
        if let (Some(first), Some(header)) = (first_section, header) {
            if first != header {
                self.tree_mut().insert_before(first, header)?;
                tracing::debug!("moved header {} before {}", header, first);
            }
        }

        // Cells directly under a row group go into a row
        let groups: Vec<NodeId> = self
            .tree()
            .children(table)
            .iter()
            .copied()
            .filter(|&c| self.is_tag_in(c, ROW_GROUPS))
            .collect();
        for group in groups {
            for run in self.child_runs(group, |ctx, c| ctx.is_tag_in(c, CELLS)) {
                self.tree_mut().restructure_as_child(group, &run, "tr", &[])?;
            }
        }

        self.ensure_empty_line_placeholders(table)?;
        Ok(())
    }

    fn merge_following_lists(&mut self, list: NodeId) -> EditResult<()> {
        while let Some(next) = self.tree().next_sibling(list) {
            let same = match (self.tree().get(list).and_then(Node::as_element), self.tree().get(next).and_then(Node::as_element)) {
                (Some(a), Some(b)) => a.same_structure(b),
                _ => false,
            };
            if !same {
                break;
            }
            let tree = self.tree_mut();
            tree.move_children(next, 0, list)?;
            tree.detach(next);
            tracing::debug!("merged list {} into {}", next, list);
        }
        Ok(())
    }

    /// A list directly inside a list moves into the preceding item
    fn rehome_nested_lists(&mut self, list: NodeId) -> EditResult<()> {
        let nested: Vec<NodeId> = self
            .tree()
            .children(list)
            .iter()
            .copied()
            .filter(|&c| self.is_tag_in(c, LISTS))
            .collect();
        for child in nested {
            let item = self
                .tree()
                .prev_sibling(child)
                .filter(|&prev| self.tree().tag(prev) == Some("li"));
            match item {
                Some(item) => {
                    self.tree_mut().append_child(item, child)?;
                }
                None => {
                    self.tree_mut().insert_as_parent(child, "li", &[])?;
                }
            }
        }
        Ok(())
    }

    /// Content sitting directly in a list is wrapped in items
    fn wrap_loose_items(&mut self, list: NodeId) -> EditResult<()> {
        let blank: Vec<NodeId> = self
            .tree()
            .children(list)
            .iter()
            .copied()
            .filter(|&c| self.tree().text(c).is_some_and(is_blank_text))
            .collect();
        for id in blank {
            self.tree_mut().detach(id);
        }
        for run in self.child_runs(list, |ctx, c| ctx.tree().tag(c) != Some("li")) {
            self.tree_mut().restructure_as_child(list, &run, "li", &[])?;
        }
        Ok(())
    }

    /// Maximal runs of consecutive children matching `pred`
    fn child_runs(&self, parent: NodeId, pred: impl Fn(&Self, NodeId) -> bool) -> Vec<Vec<NodeId>> {
        let mut runs = Vec::new();
        let mut run = Vec::new();
        for &child in self.tree().children(parent) {
            if pred(self, child) {
                run.push(child);
            } else if !run.is_empty() {
                runs.push(std::mem::take(&mut run));
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }
        runs
    }

    fn is_tag_in(&self, id: NodeId, tags: &[&str]) -> bool {
        self.tree().tag(id).is_some_and(|tag| tags.contains(&tag))
    }
}
