//! HTML Node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of HTML node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content
    Text,
    /// Raw text content (script/style/textarea/title), serialized unescaped
    RawText,
    /// Comment
    Comment,
    /// Doctype declaration
    Doctype,
}

/// An HTML node in the arena
#[derive(Debug, Clone)]
pub struct HtmlNode {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Index into string pool for name (elements) or content (other kinds)
    pub name_id: u32,
    /// Start of attributes in attribute arena (for elements)
    pub attr_start: u32,
    /// Number of attributes
    pub attr_count: u16,
    /// Depth in document tree
    pub depth: u16,
}

impl HtmlNode {
    /// Create a new document root node
    pub fn document() -> Self {
        HtmlNode {
            kind: NodeKind::Document,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id: 0,
            attr_start: 0,
            attr_count: 0,
            depth: 0,
        }
    }

    /// Create a new element node
    pub fn element(name_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        HtmlNode {
            kind: NodeKind::Element,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    /// Create a new text node
    pub fn text(content_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        HtmlNode {
            kind: NodeKind::Text,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id: content_id,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    /// Create a new raw text node
    pub fn raw_text(content_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        HtmlNode {
            kind: NodeKind::RawText,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id: content_id,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    /// Create a new comment node
    pub fn comment(content_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        HtmlNode {
            kind: NodeKind::Comment,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id: content_id,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    /// Create a doctype node
    pub fn doctype(content_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        HtmlNode {
            kind: NodeKind::Doctype,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id: content_id,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.attr_count > 0
    }
}

/// Stored attribute
#[derive(Debug, Clone, Copy)]
pub struct HtmlAttribute {
    /// Index into string pool for attribute name
    pub name_id: u32,
    /// Index into string pool for attribute value
    pub value_id: u32,
}

impl HtmlAttribute {
    pub fn new(name_id: u32, value_id: u32) -> Self {
        HtmlAttribute { name_id, value_id }
    }
}

/// Check whether a tag name is a void element (never takes children)
pub fn is_void_element(name: &str) -> bool {
    const VOID: &[&str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ];
    VOID.iter().any(|v| name.eq_ignore_ascii_case(v))
}
