//! Plugin calling conventions.
//!
//! A plugin consumes the working tree and produces the tree the next plugin
//! will observe. Three conventions exist, represented as a closed set built
//! at construction time:
//!
//! - [`Plugin::sync`]: returns the result directly.
//! - [`Plugin::callback`]: receives a [`Done`] completion handle and fires
//!   it exactly once, possibly from another task.
//! - [`Plugin::future`]: returns a future the pipeline awaits.
//!
//! Synchronous processing accepts only the first kind; see
//! [`ProcessError::SyncPlugin`](crate::ProcessError::SyncPlugin).

use std::future::Future;
use std::pin::Pin;

use arbor_tree::Tree;
use tokio::sync::oneshot;

/// Opaque error produced by plugins and collaborator overrides.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future returned by future-style plugins.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Outcome of one plugin application.
pub type PluginResult = Result<Tree, BoxError>;

type SyncFn = Box<dyn FnMut(Tree) -> PluginResult + Send>;
type CallbackFn = Box<dyn FnMut(Tree, Done) + Send>;
type FutureFn = Box<dyn FnMut(Tree) -> BoxFuture<'static, PluginResult> + Send>;

/// A unit of tree-to-tree transformation.
pub struct Plugin {
    label: Option<String>,
    pub(crate) kind: PluginKind,
}

pub(crate) enum PluginKind {
    Sync(SyncFn),
    Callback(CallbackFn),
    Future(FutureFn),
}

impl Plugin {
    /// A direct-return plugin.
    pub fn sync<F>(apply: F) -> Self
    where
        F: FnMut(Tree) -> PluginResult + Send + 'static,
    {
        Self {
            label: None,
            kind: PluginKind::Sync(Box::new(apply)),
        }
    }

    /// A callback-style plugin. The plugin must fire `done` exactly once;
    /// the handle consumes itself, so firing twice is unrepresentable, and
    /// dropping it unfired fails the invocation instead of hanging it.
    pub fn callback<F>(apply: F) -> Self
    where
        F: FnMut(Tree, Done) + Send + 'static,
    {
        Self {
            label: None,
            kind: PluginKind::Callback(Box::new(apply)),
        }
    }

    /// A future-returning plugin.
    pub fn future<F, Fut>(mut apply: F) -> Self
    where
        F: FnMut(Tree) -> Fut + Send + 'static,
        Fut: Future<Output = PluginResult> + Send + 'static,
    {
        Self {
            label: None,
            kind: PluginKind::Future(Box::new(move |tree| Box::pin(apply(tree)))),
        }
    }

    /// Attach a label used in diagnostics. Unlabeled plugins are reported
    /// by registration index.
    #[must_use]
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(crate) fn describe(&self, index: usize) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("#{index}"))
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self.kind {
            PluginKind::Sync(_) => "synchronous",
            PluginKind::Callback(_) => "callback-style",
            PluginKind::Future(_) => "future-returning",
        }
    }
}

/// Single-shot completion handle passed to callback-style plugins.
pub struct Done {
    tx: oneshot::Sender<PluginResult>,
}

impl Done {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<PluginResult>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Complete successfully with the (possibly replaced) tree.
    pub fn ok(self, tree: Tree) {
        // The receiver only disappears if the invocation was dropped.
        let _ = self.tx.send(Ok(tree));
    }

    /// Fail the invocation.
    pub fn err(self, error: impl Into<BoxError>) {
        let _ = self.tx.send(Err(error.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_prefers_label() {
        let plugin = Plugin::sync(Ok).named("uppercase");
        assert_eq!(plugin.describe(3), "uppercase");
        let unnamed = Plugin::sync(Ok);
        assert_eq!(unnamed.describe(3), "#3");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Plugin::sync(Ok).kind_name(), "synchronous");
        assert_eq!(
            Plugin::callback(|tree, done| done.ok(tree)).kind_name(),
            "callback-style"
        );
        assert_eq!(
            Plugin::future(|tree| async move { Ok(tree) }).kind_name(),
            "future-returning"
        );
    }
}
