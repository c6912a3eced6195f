//! Per-invocation processing options.

use std::sync::Arc;

use arbor_parser::ParseOptions;
use arbor_render::RenderOptions;
use arbor_tree::Tree;

use crate::plugin::BoxError;

/// Parser collaborator: `(text, options) -> Tree`.
pub type ParserFn = Arc<dyn Fn(&str, &ParseOptions) -> Result<Tree, BoxError> + Send + Sync>;

/// Renderer collaborator: `(tree, options) -> text`.
pub type RenderFn = Arc<dyn Fn(&Tree, &RenderOptions) -> Result<String, BoxError> + Send + Sync>;

/// Options read once per `process` invocation.
///
/// Overrides replace the default parser/renderer for that invocation only;
/// the parse and render option records are forwarded verbatim to whichever
/// collaborator runs.
#[derive(Clone, Default)]
pub struct ProcessOptions {
    /// Replacement parser for this invocation.
    pub parser: Option<ParserFn>,
    /// Replacement renderer for this invocation.
    pub render: Option<RenderFn>,
    /// Pass-through options for the parser.
    pub parse_options: ParseOptions,
    /// Pass-through options for the renderer.
    pub render_options: RenderOptions,
}

impl ProcessOptions {
    /// Options with default collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parser for this invocation.
    #[must_use]
    pub fn with_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str, &ParseOptions) -> Result<Tree, BoxError> + Send + Sync + 'static,
    {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Replace the renderer for this invocation.
    #[must_use]
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Tree, &RenderOptions) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Set parser pass-through options.
    #[must_use]
    pub fn with_parse_options(mut self, parse_options: ParseOptions) -> Self {
        self.parse_options = parse_options;
        self
    }

    /// Set renderer pass-through options.
    #[must_use]
    pub fn with_render_options(mut self, render_options: RenderOptions) -> Self {
        self.render_options = render_options;
        self
    }
}

impl std::fmt::Debug for ProcessOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessOptions")
            .field("parser", &self.parser.as_ref().map(|_| "<override>"))
            .field("render", &self.render.as_ref().map(|_| "<override>"))
            .field("parse_options", &self.parse_options)
            .field("render_options", &self.render_options)
            .finish()
    }
}

/// Input to a `process` invocation: raw markup, or an already-built tree
/// that bypasses the parser.
#[derive(Debug)]
pub enum Input {
    /// Raw markup to run through the configured parser.
    Source(String),
    /// An already-built tree, used as-is.
    Tree(Tree),
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Source(text.to_owned())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Source(text)
    }
}

impl From<Tree> for Input {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}
