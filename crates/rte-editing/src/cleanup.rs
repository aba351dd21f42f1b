//! Post-edit cleanup
//!
//! Keeps the tree editable after structural changes: empty blocks get a
//! placeholder, vacuous wrappers go away, and loose inline content at the
//! root is wrapped in blocks.

use rte_dom::NodeId;

use crate::context::{EditingContext, is_blank_text};
use crate::error::EditResult;
use crate::role::{self, RoleKind};

impl EditingContext<'_> {
    /// Give every empty container under `node` (itself included) a placeholder
    ///
    /// Returns how many placeholders were added.
    pub fn ensure_empty_line_placeholders(&mut self, node: NodeId) -> EditResult<usize> {
        let order: Vec<NodeId> = self.tree().descendants(node).collect();
        let mut added = 0;
        for &id in order.iter().rev() {
            if !role::is_container(self.tree(), id) || self.has_line_content(id) {
                continue;
            }
            let Some(placeholder) = self.create_placeholder() else {
                return Ok(added);
            };
            let host = self.placeholder_host(id);
            self.tree_mut().append_child(host, placeholder)?;
            added += 1;
        }
        if added > 0 {
            tracing::debug!("added {} placeholders under {}", added, node);
        }
        Ok(added)
    }

    /// Drop empty text nodes and childless inline wrappers below `node`
    pub fn remove_empty_structures(&mut self, node: NodeId) -> EditResult<usize> {
        let order: Vec<NodeId> = self.tree().descendants(node).skip(1).collect();
        let mut removed = 0;
        for &id in order.iter().rev() {
            let tree = self.tree();
            let empty_text = tree.text(id).is_some_and(str::is_empty);
            let empty_wrapper = role::is_structure_element(tree, id) && tree.children(id).is_empty();
            if empty_text || empty_wrapper {
                self.tree_mut().detach(id);
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::trace!("removed {} empty nodes under {}", removed, node);
        }
        Ok(removed)
    }

    /// Wrap runs of inline content directly under the root in new blocks
    ///
    /// Root-level `<br>`s separate runs and are consumed; a break ending a
    /// run does not start another block. Returns the blocks created.
    pub fn ensure_block_content(&mut self, tag: &str, attrs: &[(&str, &str)]) -> EditResult<Vec<NodeId>> {
        let root = self.root();
        let mut runs: Vec<Vec<NodeId>> = Vec::new();
        let mut run = Vec::new();
        for &child in self.tree().children(root) {
            if role::is_block(self.tree(), child) {
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
            } else {
                run.push(child);
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }

        let mut created = Vec::new();
        for run in runs {
            let blank = run
                .iter()
                .all(|&id| self.tree().text(id).is_some_and(is_blank_text));
            if blank {
                continue;
            }
            created.extend(self.wrap_run(&run, tag, attrs)?);
        }
        for &block in &created {
            self.ensure_empty_line_placeholders(block)?;
        }
        if !created.is_empty() {
            tracing::debug!("wrapped loose content into {} <{}> blocks", created.len(), tag);
        }
        Ok(created)
    }

    fn wrap_run(&mut self, run: &[NodeId], tag: &str, attrs: &[(&str, &str)]) -> EditResult<Vec<NodeId>> {
        let root = self.root();
        let mut segments: Vec<Vec<NodeId>> = vec![Vec::new()];
        let mut breaks = Vec::new();
        for &id in run {
            if self.tree().tag(id) == Some("br") {
                breaks.push(id);
                segments.push(Vec::new());
            } else if let Some(last) = segments.last_mut() {
                last.push(id);
            }
        }
        if !breaks.is_empty() && segments.last().is_some_and(Vec::is_empty) {
            segments.pop();
        }

        let mut blocks = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let block = if segment.is_empty() {
                let block = self.create_element(tag, attrs);
                self.tree_mut().insert_before(breaks[i], block)?;
                block
            } else {
                self.tree_mut().restructure_as_child(root, segment, tag, attrs)?
            };
            blocks.push(block);
        }
        for br in breaks {
            self.tree_mut().detach(br);
        }
        Ok(blocks)
    }

    /// Any text or atom below `id`
    fn has_line_content(&self, id: NodeId) -> bool {
        let tree = self.tree();
        tree.descendants(id).skip(1).any(|d| match tree.text(d) {
            Some(text) => !text.is_empty(),
            None => role::role_at(tree, d) == RoleKind::Atomic,
        })
    }

    /// Innermost trailing inline wrapper of a container
    fn placeholder_host(&self, container: NodeId) -> NodeId {
        let tree = self.tree();
        let mut current = container;
        while let Some(&last) = tree.children(current).last() {
            if !role::is_structure_element(tree, last) {
                break;
            }
            current = last;
        }
        current
    }
}
