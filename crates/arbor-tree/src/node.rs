//! Tree node types.
//!
//! A document is an ordered sequence of [`Node`]s. A node is either an
//! opaque text fragment or an element carrying a tag, optional attributes
//! and child nodes.

use std::collections::BTreeMap;

/// Element attributes, keyed by attribute name.
pub type Attrs = BTreeMap<String, String>;

/// A single node in a document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Node {
    /// Opaque text content (includes preserved comments and directives).
    Text(String),
    /// An element with tag, attributes and children.
    Element(Element),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes; `None` when the element carries no attributes.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub attrs: Option<Attrs>,
    /// Child nodes, possibly empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Vec<Node>,
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create an element node with no attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element(Element::new(tag))
    }

    /// Returns `true` for text nodes.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns `true` for element nodes.
    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Text content, if this is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Element(_) => None,
        }
    }

    /// The element, if this is an element node.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Mutable access to the element, if this is an element node.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }
}

impl Element {
    /// Create an element with the given tag and no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: None,
            content: Vec::new(),
        }
    }

    /// Set an attribute, creating the attribute map on first use.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.content.push(child.into());
        self
    }

    /// Replace the children with the given sequence.
    #[must_use]
    pub fn with_content(mut self, content: impl IntoIterator<Item = Node>) -> Self {
        self.content = content.into_iter().collect();
        self
    }

    /// Set an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(name.into(), value.into());
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_element_builder() {
        let el = Element::new("a")
            .with_attr("href", "/docs")
            .with_child("home");
        assert_eq!(el.tag, "a");
        assert_eq!(el.attr("href"), Some("/docs"));
        assert_eq!(el.content, vec![Node::text("home")]);
    }

    #[test]
    fn test_attrs_absent_until_set() {
        let mut el = Element::new("p");
        assert!(el.attrs.is_none());
        el.set_attr("id", "x");
        assert_eq!(el.attr("id"), Some("x"));
        assert_eq!(el.attr("class"), None);
    }

    #[test]
    fn test_node_accessors() {
        let text = Node::text("hi");
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("hi"));
        assert!(text.as_element().is_none());

        let el = Node::element("div");
        assert!(el.is_element());
        assert!(el.as_text().is_none());
        assert_eq!(el.as_element().map(|e| e.tag.as_str()), Some("div"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let node = Node::Element(
            Element::new("p")
                .with_attr("id", "x")
                .with_child("hi"),
        );
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"tag":"p","attrs":{"id":"x"},"content":["hi"]}"#);
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
