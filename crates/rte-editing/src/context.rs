//! Editing context
//!
//! The single gateway to the tree during one logical edit: it owns the
//! exclusive borrow of the tree, knows the editing root, and carries the
//! host policy chosen when it was built.

use rte_dom::{DomTree, NodeId};

use crate::config::{EditorConfig, PlaceholderStyle};
use crate::role::{self, RoleKind};

/// Placeholder text used by [`PlaceholderStyle::ZeroWidthSpace`]
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

pub struct EditingContext<'t> {
    tree: &'t mut DomTree,
    root: NodeId,
    config: EditorConfig,
}

impl<'t> EditingContext<'t> {
    /// Context editing the whole tree
    pub fn new(tree: &'t mut DomTree, config: EditorConfig) -> Self {
        let root = tree.root();
        Self { tree, root, config }
    }

    /// Context restricted to the subtree under `root`
    pub fn with_root(tree: &'t mut DomTree, root: NodeId, config: EditorConfig) -> Self {
        Self { tree, root, config }
    }

    pub fn tree(&self) -> &DomTree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        if self.is_root(id) {
            return None;
        }
        self.tree.parent(id)
    }

    /// Detached element with attributes applied in order
    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.tree.create_element_with(tag, attrs)
    }

    /// Detached text node
    pub fn create_text(&mut self, value: &str) -> NodeId {
        self.tree.create_text(value)
    }

    /// Detached placeholder node for the configured style
    pub fn create_placeholder(&mut self) -> Option<NodeId> {
        match self.config.placeholder {
            PlaceholderStyle::LineBreak => Some(self.tree.create_element("br")),
            PlaceholderStyle::ZeroWidthSpace => {
                Some(self.tree.create_text(&ZERO_WIDTH_SPACE.to_string()))
            }
            PlaceholderStyle::None => None,
        }
    }

    /// Ancestors of `id` up to and including the editing root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let root = self.root;
        let mut done = id == root;
        self.tree.ancestors(id).take_while(move |&a| {
            if done {
                return false;
            }
            done = a == root;
            true
        })
    }

    /// `id` and its ancestors up to and including the editing root
    pub fn ancestors_or_self(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(id).chain(self.ancestors(id))
    }

    /// Whether `id` lies inside the editing root
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.is_ancestor_or_self(self.root, id)
    }

    /// Nearest container-role ancestor-or-self inside the editing root
    pub fn nearest_container(&self, id: NodeId) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        self.ancestors_or_self(id)
            .find(|&a| role::role_at(self.tree, a) == RoleKind::Container)
    }

    /// Nearest table cell or caption ancestor-or-self inside the editing root
    pub fn nearest_aux_root(&self, id: NodeId) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        self.ancestors_or_self(id)
            .find(|&a| self.tree.get(a).is_some_and(role::is_aux_root))
    }

    /// Whether any direct child is a container
    pub fn has_container_children(&self, id: NodeId) -> bool {
        self.tree
            .children(id)
            .iter()
            .any(|&c| role::is_container(self.tree, c))
    }
}

/// Text made only of placeholder characters
pub fn is_placeholder_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == ZERO_WIDTH_SPACE)
}

/// Whitespace or placeholder characters only (empty included)
pub fn is_blank_text(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == ZERO_WIDTH_SPACE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_stop_at_root() {
        let mut tree = rte_html::parse("<div><p><b>x</b></p></div>");
        let div = tree.children(tree.root())[0];
        let p = tree.children(div)[0];
        let b = tree.children(p)[0];
        let x = tree.children(b)[0];

        let ctx = EditingContext::with_root(&mut tree, div, EditorConfig::default());
        assert_eq!(ctx.ancestors(x).collect::<Vec<_>>(), vec![b, p, div]);
        assert_eq!(ctx.nearest_container(x), Some(p));
        assert_eq!(ctx.parent(div), None);
        assert!(ctx.is_root(div));
    }

    #[test]
    fn test_placeholder_styles() {
        let mut tree = DomTree::new();
        let mut ctx = EditingContext::new(&mut tree, EditorConfig::default());
        let br = ctx.create_placeholder().unwrap();
        assert_eq!(ctx.tree().tag(br), Some("br"));

        let config = EditorConfig {
            placeholder: PlaceholderStyle::ZeroWidthSpace,
            ..EditorConfig::default()
        };
        let mut tree = DomTree::new();
        let mut ctx = EditingContext::new(&mut tree, config);
        let zwsp = ctx.create_placeholder().unwrap();
        assert!(is_placeholder_text(ctx.tree().text(zwsp).unwrap()));
    }

    #[test]
    fn test_blank_text() {
        assert!(is_blank_text(""));
        assert!(is_blank_text(" \n\t\u{200B}"));
        assert!(!is_blank_text(" a "));
        assert!(!is_placeholder_text(""));
    }
}
