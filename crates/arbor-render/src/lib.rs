//! Serializes [`arbor_tree::Tree`] documents back to HTML.
//!
//! This is the pipeline's default renderer. Output is recomputed from the
//! tree on every call; text nodes are emitted verbatim and attribute values
//! are escaped. Single (void) tags follow the standard HTML set plus the
//! template-expansion tags, extensible via [`RenderOptions::single_tags`].
//!
//! # Example
//!
//! ```
//! use arbor_render::{render, RenderOptions};
//! use arbor_tree::{Element, Node, Tree};
//!
//! let tree = Tree::from_nodes(vec![Node::Element(
//!     Element::new("p").with_attr("id", "x").with_child("hi"),
//! )]);
//! assert_eq!(render(&tree, &RenderOptions::default()), "<p id=\"x\">hi</p>");
//! ```

mod options;
mod render;

pub use options::{ClosingSingleTag, RenderOptions, TagPattern};
pub use render::render;
