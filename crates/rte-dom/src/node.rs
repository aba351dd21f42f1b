//! DOM Node - arena slot representation
//!
//! A node never references another node directly: the parent link and the
//! ordered child list are handles into the owning [`DomTree`](crate::DomTree).

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (None if root or detached)
    pub parent: Option<NodeId>,
    /// Ordered children
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new(tag)),
        }
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Text(TextData { content: content.into() }),
        }
    }

    /// Create a document node
    pub fn document() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Document,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Check if this is the document node
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }

    /// Lower-cased tag name for elements
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    /// Attribute lookup for elements
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.get_attr(name))
    }

    /// Number of offsets this node exposes: characters for text, children otherwise.
    pub fn offset_len(&self) -> usize {
        match &self.data {
            NodeData::Text(t) => t.char_len(),
            _ => self.children.len(),
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, lower-cased
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute
    ///
    /// `className` is stored as `class`.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let name = if name == "className" { "class" } else { name };
        let value = value.into();
        // Check if attribute already exists
        for attr in self.attrs.iter_mut() {
            if attr.name.eq_ignore_ascii_case(name) {
                attr.value = value;
                return;
            }
        }
        self.attrs.push(Attribute { name: name.to_ascii_lowercase(), value });
    }

    /// Same tag and the same attribute set, ignoring attribute order
    pub fn same_structure(&self, other: &ElementData) -> bool {
        if self.tag != other.tag || self.attrs.len() != other.attrs.len() {
            return false;
        }
        self.attrs.iter().all(|a| other.get_attr(&a.name) == Some(a.value.as_str()))
    }
}

/// Text node data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextData {
    pub content: String,
}

impl TextData {
    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte index of a character offset, clamped to the end
    pub fn byte_index(&self, char_offset: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_offset)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
