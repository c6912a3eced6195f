//! Match expressions for [`Tree::select`](crate::Tree::select).

use regex::Regex;

use crate::node::{Attrs, Node};

/// A match expression.
///
/// - [`Matcher::Text`] matches text nodes with identical content.
/// - [`Matcher::Pattern`] matches text nodes against a regular expression.
/// - [`Matcher::Node`] matches element nodes against a partial descriptor.
/// - [`Matcher::Any`] is a logical OR over a list of expressions.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact text-node content.
    Text(String),
    /// Regular expression over text-node content.
    Pattern(Regex),
    /// Partial element descriptor.
    Node(NodeMatcher),
    /// Matches when any of the inner expressions match.
    Any(Vec<Matcher>),
}

impl Matcher {
    /// Shorthand for a tag-only element descriptor.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Node(NodeMatcher::new().tag(tag))
    }

    /// Whether `node` satisfies this expression.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Text(text) => node.as_text() == Some(text.as_str()),
            Self::Pattern(pattern) => node.as_text().is_some_and(|t| pattern.is_match(t)),
            Self::Node(descriptor) => descriptor.matches(node),
            Self::Any(inner) => inner.iter().any(|m| m.matches(node)),
        }
    }
}

/// A partial element descriptor.
///
/// Every specified field must be satisfied: `tag` by equality, `attrs` by
/// per-key equality (the element may carry additional attributes), and
/// `content` by whole-sequence equality. An empty descriptor matches every
/// element node.
#[derive(Debug, Clone, Default)]
pub struct NodeMatcher {
    tag: Option<String>,
    attrs: Option<Attrs>,
    content: Option<Vec<Node>>,
}

impl NodeMatcher {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact tag name.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Require an attribute with an exact value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(name.into(), value.into());
        self
    }

    /// Require exact child content.
    #[must_use]
    pub fn content(mut self, content: impl IntoIterator<Item = Node>) -> Self {
        self.content = Some(content.into_iter().collect());
        self
    }

    fn matches(&self, node: &Node) -> bool {
        let Some(el) = node.as_element() else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if el.tag != *tag {
                return false;
            }
        }
        if let Some(attrs) = &self.attrs {
            let ok = attrs
                .iter()
                .all(|(name, value)| el.attr(name) == Some(value.as_str()));
            if !ok {
                return false;
            }
        }
        if let Some(content) = &self.content {
            if el.content != *content {
                return false;
            }
        }
        true
    }
}

impl From<&str> for Matcher {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Matcher {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Regex> for Matcher {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<NodeMatcher> for Matcher {
    fn from(descriptor: NodeMatcher) -> Self {
        Self::Node(descriptor)
    }
}

impl From<Vec<Matcher>> for Matcher {
    fn from(inner: Vec<Matcher>) -> Self {
        Self::Any(inner)
    }
}
