//! Node classification
//!
//! Maps tags to editing roles. Most tags have a fixed role; a few depend on
//! the node itself and are resolved when asked.

use rte_dom::{DomTree, Node, NodeData, NodeId};

/// Editing role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    /// Block that anchors a line of content (p, li, td, ...)
    Container,
    /// Inline formatting, and the default for unknown tags
    Structure,
    /// List and table scaffolding, skipped when enumerating containers
    Ignore,
    /// One caret position with no interior (br, img, named anchor)
    Atomic,
}

/// Table entry: a fixed role, or a resolver run against the node
#[derive(Clone, Copy)]
pub enum Role {
    Fixed(RoleKind),
    Dynamic(fn(&Node) -> RoleKind),
}

/// Kind of a one-character node, which fixes its plain-text sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    LineBreak,
    Image,
    Anchor,
}

impl AtomKind {
    /// Character standing in for the node in plain text
    pub fn sentinel(self) -> char {
        match self {
            AtomKind::LineBreak => '\n',
            AtomKind::Image => '$',
            AtomKind::Anchor => '#',
        }
    }
}

const ROLES: &[(&str, Role)] = &[
    ("p", Role::Fixed(RoleKind::Container)),
    ("div", Role::Fixed(RoleKind::Container)),
    ("li", Role::Fixed(RoleKind::Container)),
    ("td", Role::Fixed(RoleKind::Container)),
    ("th", Role::Fixed(RoleKind::Container)),
    ("caption", Role::Fixed(RoleKind::Container)),
    ("address", Role::Fixed(RoleKind::Container)),
    ("blockquote", Role::Fixed(RoleKind::Container)),
    ("pre", Role::Fixed(RoleKind::Container)),
    ("h1", Role::Fixed(RoleKind::Container)),
    ("h2", Role::Fixed(RoleKind::Container)),
    ("h3", Role::Fixed(RoleKind::Container)),
    ("h4", Role::Fixed(RoleKind::Container)),
    ("h5", Role::Fixed(RoleKind::Container)),
    ("h6", Role::Fixed(RoleKind::Container)),
    ("ul", Role::Fixed(RoleKind::Ignore)),
    ("ol", Role::Fixed(RoleKind::Ignore)),
    ("table", Role::Fixed(RoleKind::Ignore)),
    ("tbody", Role::Fixed(RoleKind::Ignore)),
    ("thead", Role::Fixed(RoleKind::Ignore)),
    ("tfoot", Role::Fixed(RoleKind::Ignore)),
    ("tr", Role::Fixed(RoleKind::Ignore)),
    ("br", Role::Fixed(RoleKind::Atomic)),
    ("img", Role::Fixed(RoleKind::Atomic)),
    ("a", Role::Dynamic(anchor_role)),
];

const AUX_ROOTS: &[&str] = &["td", "th", "caption"];

/// An anchor is a navigable point only when it names a target and has nothing inside
fn anchor_role(node: &Node) -> RoleKind {
    if node.attr("name").is_some() && node.attr("href").is_none() && node.children.is_empty() {
        RoleKind::Atomic
    } else {
        RoleKind::Structure
    }
}

/// Role of a node
///
/// Text counts as inline content; the document node is scaffolding.
pub fn role_of(node: &Node) -> RoleKind {
    let elem = match &node.data {
        NodeData::Element(elem) => elem,
        NodeData::Text(_) => return RoleKind::Structure,
        NodeData::Document => return RoleKind::Ignore,
    };
    let role = ROLES
        .iter()
        .find(|(tag, _)| tag.eq_ignore_ascii_case(&elem.tag))
        .map(|(_, role)| *role);
    match role {
        Some(Role::Fixed(kind)) => kind,
        Some(Role::Dynamic(resolve)) => resolve(node),
        None => RoleKind::Structure,
    }
}

/// Role of a node by handle; unknown handles are scaffolding
pub fn role_at(tree: &DomTree, id: NodeId) -> RoleKind {
    tree.get(id).map_or(RoleKind::Ignore, role_of)
}

pub fn is_container(tree: &DomTree, id: NodeId) -> bool {
    role_at(tree, id) == RoleKind::Container
}

/// Table cells and captions
pub fn is_aux_root(node: &Node) -> bool {
    node.tag().is_some_and(|tag| AUX_ROOTS.contains(&tag))
}

/// Atom kind of a one-character node
pub fn atom_kind(node: &Node) -> Option<AtomKind> {
    if role_of(node) != RoleKind::Atomic {
        return None;
    }
    match node.tag()? {
        "br" => Some(AtomKind::LineBreak),
        "img" => Some(AtomKind::Image),
        _ => Some(AtomKind::Anchor),
    }
}

/// Whether a node lays out as a block: a container, scaffolding, or
/// anything holding a container
pub fn is_block(tree: &DomTree, id: NodeId) -> bool {
    match role_at(tree, id) {
        RoleKind::Container | RoleKind::Ignore => true,
        RoleKind::Atomic => false,
        RoleKind::Structure => tree
            .descendants(id)
            .skip(1)
            .any(|d| is_container(tree, d)),
    }
}

/// Inline formatting element (not text, not an atom)
pub fn is_structure_element(tree: &DomTree, id: NodeId) -> bool {
    tree.is_element(id) && role_at(tree, id) == RoleKind::Structure
}
