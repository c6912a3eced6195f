//! Plugin-pipeline document transformer for HTML trees.
//!
//! A [`Pipeline`] parses markup into a mutable [`Tree`], applies an ordered
//! list of independently-authored [`Plugin`]s to it, and wraps the final
//! tree in a [`LazyResult`] whose rendered form is computed only when read.
//!
//! Plugins come in three calling conventions (direct-return,
//! callback-style, future-returning) behind one execution contract, and the
//! pipeline runs in one of two modes:
//!
//! - [`Pipeline::process_sync`]: a plain sequential loop that fails fast on
//!   any asynchronous plugin.
//! - [`Pipeline::process`]: sequential as well, but each plugin application
//!   may suspend; no two plugins ever run concurrently.
//!
//! # Example
//!
//! ```
//! use arbor::{NodeMatcher, Node, Pipeline, Plugin, ProcessOptions};
//!
//! let mut pipeline = Pipeline::new().with_plugin(Plugin::sync(|mut tree| {
//!     tree.select(NodeMatcher::new().tag("p"), |node| {
//!         node.as_element()
//!             .map(|el| Node::Element(el.clone().with_attr("id", "x")))
//!     });
//!     Ok(tree)
//! }));
//!
//! let result = pipeline
//!     .process_sync("<p>hi</p>", ProcessOptions::default())
//!     .unwrap();
//! assert_eq!(result.html().unwrap(), "<p id=\"x\">hi</p>");
//! ```

mod error;
mod options;
mod pipeline;
mod plugin;
mod result;

pub use error::ProcessError;
pub use options::{Input, ParserFn, ProcessOptions, RenderFn};
pub use pipeline::Pipeline;
pub use plugin::{BoxError, BoxFuture, Done, Plugin, PluginResult};
pub use result::LazyResult;

// The collaborator surfaces, re-exported so plugin authors only need this
// crate.
pub use arbor_parser::{parse, Directive, ParseOptions};
pub use arbor_render::{render, ClosingSingleTag, RenderOptions, TagPattern};
pub use arbor_tree::{Attrs, Element, Matcher, Message, Messages, Node, NodeMatcher, Tree};
