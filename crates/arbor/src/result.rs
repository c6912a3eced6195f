//! Lazy processing result.

use arbor_render::RenderOptions;
use arbor_tree::{Message, Messages, Tree};

use crate::options::{ProcessOptions, RenderFn};
use crate::plugin::BoxError;

/// The outcome of a `process` invocation: the final tree, the accumulated
/// messages, and an on-demand rendered form.
///
/// Rendering is deferred and never cached: every [`LazyResult::html`] call
/// re-invokes the renderer on the held tree, so mutations made through
/// [`LazyResult::tree_mut`] are reflected in later reads.
pub struct LazyResult {
    tree: Tree,
    render: Option<RenderFn>,
    render_options: RenderOptions,
}

impl std::fmt::Debug for LazyResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyResult")
            .field("tree", &self.tree)
            .field("render", &self.render.as_ref().map(|_| ".."))
            .field("render_options", &self.render_options)
            .finish()
    }
}

impl LazyResult {
    pub(crate) fn new(tree: Tree, options: ProcessOptions) -> Self {
        Self {
            tree,
            render: options.render,
            render_options: options.render_options,
        }
    }

    /// Render the tree with the invocation's renderer and options.
    ///
    /// Recomputed on every call. A renderer failure propagates to the
    /// caller here, not at `process` time.
    pub fn html(&self) -> Result<String, BoxError> {
        match &self.render {
            Some(render) => render(&self.tree, &self.render_options),
            None => Ok(arbor_render::render(&self.tree, &self.render_options)),
        }
    }

    /// The final tree.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the final tree, for further inspection or
    /// transformation before rendering.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Consume the result, returning the final tree.
    #[must_use]
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Snapshot of the messages plugins appended, in append order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.tree.messages().to_vec()
    }

    /// Handle to the invocation's message sequence.
    #[must_use]
    pub fn messages_handle(&self) -> &Messages {
        self.tree.messages()
    }
}
