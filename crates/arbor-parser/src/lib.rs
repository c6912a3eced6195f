//! Lenient HTML parser producing [`arbor_tree::Tree`] documents.
//!
//! This is the pipeline's default parser. It never fails: malformed markup
//! degrades to text nodes, unmatched close tags are ignored, and elements
//! left open are closed at end of input. Comments and configured directives
//! (by default only `<!doctype …>`) are preserved verbatim as text nodes.
//!
//! # Example
//!
//! ```
//! use arbor_parser::{parse, ParseOptions};
//!
//! let tree = parse("<p id=\"x\">hi</p>", &ParseOptions::default());
//! assert_eq!(tree.len(), 1);
//! ```

mod options;
mod parser;

pub use options::{Directive, ParseOptions};
pub use parser::parse;
