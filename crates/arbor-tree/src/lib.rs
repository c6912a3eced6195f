//! Document tree model with plugin-facing traversal and matching.
//!
//! A [`Tree`] is an ordered sequence of [`Node`]s (text fragments and
//! elements). Plugins transform trees using [`Tree::walk`] and
//! [`Tree::select`], and communicate out-of-band through the shared
//! [`Messages`] sequence the tree carries.
//!
//! # Example
//!
//! ```
//! use arbor_tree::{Element, Node, NodeMatcher, Tree};
//!
//! let mut tree = Tree::from_nodes(vec![Node::Element(
//!     Element::new("p").with_child("hi"),
//! )]);
//! tree.select(NodeMatcher::new().tag("p"), |node| {
//!     node.as_element()
//!         .map(|el| Node::Element(el.clone().with_attr("id", "x")))
//! });
//! ```

mod matcher;
mod messages;
mod node;
mod tree;

pub use matcher::{Matcher, NodeMatcher};
pub use messages::{Message, Messages};
pub use node::{Attrs, Element, Node};
pub use tree::Tree;
