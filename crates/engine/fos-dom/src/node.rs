//! DOM Node
//!
//! Nodes link to each other through `NodeId`s into the tree arena
//! instead of pointers, so detached subtrees stay addressable.

use crate::{ComputedStyle, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
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
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Natively interactive element categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveKind {
    /// `<a>` or `<area>`; only navigable with an `href`
    Link { has_href: bool },
    /// `<button>`, `<select>`, `<textarea>`, non-hidden `<input>`
    FormControl,
    /// `<summary>` disclosure toggle
    Summary,
    /// `contenteditable` region
    Editable,
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercased
    pub tag_name: String,
    pub attrs: NamedNodeMap,
    pub style: ComputedStyle,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            style: ComputedStyle::default(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag_name == tag
    }

    /// Whether `contenteditable` makes this element an editing host
    pub fn is_editable(&self) -> bool {
        match self.get_attr("contenteditable") {
            Some(v) => !v.eq_ignore_ascii_case("false"),
            None => false,
        }
    }

    /// Classify natively interactive elements
    ///
    /// Hidden inputs are never interactive.
    pub fn interactive_kind(&self) -> Option<InteractiveKind> {
        match self.tag_name.as_str() {
            "a" | "area" => Some(InteractiveKind::Link { has_href: self.has_attr("href") }),
            "input" => (!self.is_hidden_input()).then_some(InteractiveKind::FormControl),
            "button" | "select" | "textarea" => Some(InteractiveKind::FormControl),
            "summary" => Some(InteractiveKind::Summary),
            _ if self.is_editable() => Some(InteractiveKind::Editable),
            _ => None,
        }
    }

    /// `<input type="hidden">`, which never generates a box
    pub fn is_hidden_input(&self) -> bool {
        self.is("input")
            && self
                .get_attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden"))
    }

    /// Whether this is a form control with the `disabled` attribute
    pub fn is_disabled(&self) -> bool {
        matches!(
            self.tag_name.as_str(),
            "button" | "input" | "select" | "textarea" | "optgroup" | "option" | "fieldset"
        ) && self.has_attr("disabled")
    }
}
