//! The document tree and its plugin-facing traversal API.

use crate::matcher::Matcher;
use crate::messages::Messages;
use crate::node::Node;

/// An ordered sequence of [`Node`]s representing a parsed document.
///
/// A document is always a sequence, never a bare node: markup may have
/// multiple root-level elements and text fragments, and plugins operate
/// uniformly at the sequence level.
///
/// The tree also carries the [`Messages`] handle for the in-flight
/// invocation, so plugins can append out-of-band records via
/// [`Tree::messages`].
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Root-level nodes, in document order.
    pub nodes: Vec<Node>,
    messages: Messages,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a node sequence.
    #[must_use]
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            messages: Messages::new(),
        }
    }

    /// Consume the tree, returning its node sequence.
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Rebuild as a plain node sequence, dropping whatever message handle
    /// was attached. Used by the pipeline to normalize the working tree
    /// between plugins before re-attaching the invocation's own handle.
    #[must_use]
    pub fn into_plain(self) -> Self {
        Self::from_nodes(self.nodes)
    }

    /// The message sequence reachable from this tree.
    #[must_use]
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Attach a message handle, replacing the current one.
    pub fn attach_messages(&mut self, messages: Messages) {
        self.messages = messages;
    }

    /// Number of root-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit every node depth-first, in pre-order, root-level nodes
    /// included.
    ///
    /// When `visit` returns `Some(node)`, that node replaces the visited
    /// node at its position; `None` leaves it unchanged. Traversal then
    /// continues into the (possibly replaced) node's children. Returns the
    /// tree for chaining.
    ///
    /// A visitor that always returns `None` leaves the tree
    /// indistinguishable from its input.
    pub fn walk<F>(&mut self, mut visit: F) -> &mut Self
    where
        F: FnMut(&Node) -> Option<Node>,
    {
        walk_nodes(&mut self.nodes, &mut visit);
        self
    }

    /// Like [`Tree::walk`], but `visit` is only invoked for nodes matching
    /// `expression`. Non-matching nodes are left untouched but still
    /// traversed into.
    pub fn select<M, F>(&mut self, expression: M, mut visit: F) -> &mut Self
    where
        M: Into<Matcher>,
        F: FnMut(&Node) -> Option<Node>,
    {
        let expression = expression.into();
        self.walk(|node| {
            if expression.matches(node) {
                visit(node)
            } else {
                None
            }
        })
    }
}

fn walk_nodes<F>(nodes: &mut [Node], visit: &mut F)
where
    F: FnMut(&Node) -> Option<Node>,
{
    for slot in nodes.iter_mut() {
        if let Some(replacement) = visit(slot) {
            *slot = replacement;
        }
        if let Node::Element(el) = slot {
            walk_nodes(&mut el.content, visit);
        }
    }
}

// Equality ignores the message handle: two trees are equal when their node
// sequences are.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for Tree {}

impl From<Vec<Node>> for Tree {
    fn from(nodes: Vec<Node>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl FromIterator<Node> for Tree {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::from_nodes(iter.into_iter().collect())
    }
}

impl IntoIterator for Tree {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::Element;
    use crate::NodeMatcher;

    fn sample() -> Tree {
        // <div><p>hi</p>there</div>tail
        Tree::from_nodes(vec![
            Node::Element(
                Element::new("div")
                    .with_child(Node::Element(Element::new("p").with_child("hi")))
                    .with_child("there"),
            ),
            Node::text("tail"),
        ])
    }

    #[test]
    fn test_walk_noop_is_identity() {
        let mut tree = sample();
        let before = tree.clone();
        tree.walk(|_| None);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_walk_visits_every_node_preorder() {
        let mut tree = sample();
        let mut visited = Vec::new();
        tree.walk(|node| {
            visited.push(match node {
                Node::Text(t) => t.clone(),
                Node::Element(el) => format!("<{}>", el.tag),
            });
            None
        });
        assert_eq!(visited, vec!["<div>", "<p>", "hi", "there", "tail"]);
    }

    #[test]
    fn test_walk_uppercases_text_leaves_structure() {
        let mut tree = sample();
        tree.walk(|node| {
            node.as_text()
                .map(|t| Node::Text(t.to_uppercase()))
        });
        let expected = Tree::from_nodes(vec![
            Node::Element(
                Element::new("div")
                    .with_child(Node::Element(Element::new("p").with_child("HI")))
                    .with_child("THERE"),
            ),
            Node::text("TAIL"),
        ]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_walk_descends_into_replacement() {
        // Replacing an element must still traverse the replacement's children.
        let mut tree = Tree::from_nodes(vec![Node::element("a")]);
        tree.walk(|node| match node {
            Node::Element(el) if el.tag == "a" => {
                Some(Node::Element(Element::new("b").with_child("inner")))
            }
            Node::Text(t) => Some(Node::Text(t.to_uppercase())),
            Node::Element(_) => None,
        });
        let expected =
            Tree::from_nodes(vec![Node::Element(Element::new("b").with_child("INNER"))]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_select_counts_matching_tags_only() {
        let mut tree = Tree::from_nodes(vec![
            Node::element("p"),
            Node::Element(Element::new("div").with_child(Node::element("p"))),
            Node::element("span"),
        ]);
        let mut count = 0;
        tree.select(NodeMatcher::new().tag("p"), |_| {
            count += 1;
            None
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_select_replaces_matches() {
        let mut tree = Tree::from_nodes(vec![Node::Element(Element::new("p").with_child("hi"))]);
        tree.select(NodeMatcher::new().tag("p"), |node| {
            node.as_element()
                .map(|el| Node::Element(el.clone().with_attr("id", "x")))
        });
        let expected = Tree::from_nodes(vec![Node::Element(
            Element::new("p").with_attr("id", "x").with_child("hi"),
        )]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_equality_ignores_message_handle() {
        let a = sample();
        let b = sample();
        a.messages().push(serde_json::json!("extra"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_into_plain_drops_handle() {
        let mut tree = sample();
        let handle = crate::Messages::new();
        tree.attach_messages(handle.clone());
        let plain = tree.into_plain();
        assert!(!plain.messages().same_sequence(&handle));
    }
}
