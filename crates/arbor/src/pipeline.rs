//! The pipeline engine.
//!
//! Holds the ordered plugin list and drives either the strict-synchronous
//! or the permissive-asynchronous execution protocol over it. Plugins run
//! strictly one after another in registration order in both modes; plugin
//! `i + 1` always observes the fully-settled tree from plugin `i`.

use arbor_tree::{Messages, Tree};
use tracing::debug;

use crate::error::ProcessError;
use crate::options::{Input, ProcessOptions};
use crate::plugin::{Done, Plugin, PluginKind};
use crate::result::LazyResult;

/// An ordered, mutable list of plugins plus the orchestration to apply
/// them.
///
/// A pipeline is constructed once and may accumulate plugins before any
/// number of `process` invocations. Each invocation gets its own tree and
/// message sequence; only the plugin list is shared across invocations.
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<Plugin>,
    last_options: Option<ProcessOptions>,
}

impl Pipeline {
    /// An empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin. Registration order is execution order.
    pub fn use_plugin(&mut self, plugin: Plugin) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    /// Append several plugins in order.
    pub fn use_plugins(&mut self, plugins: impl IntoIterator<Item = Plugin>) -> &mut Self {
        self.plugins.extend(plugins);
        self
    }

    /// Builder-style [`Pipeline::use_plugin`].
    #[must_use]
    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Options of the most recent `process` invocation.
    #[must_use]
    pub fn last_options(&self) -> Option<&ProcessOptions> {
        self.last_options.as_ref()
    }

    /// Process synchronously.
    ///
    /// A plain sequential loop with no suspension points. Encountering a
    /// callback-style or future-returning plugin is fatal and reported
    /// before that plugin runs; subsequent plugins do not run either.
    pub fn process_sync(
        &mut self,
        input: impl Into<Input>,
        options: ProcessOptions,
    ) -> Result<LazyResult, ProcessError> {
        let (mut tree, parsed) = initial_tree(input.into(), &options)?;
        let messages = Messages::new();
        let count = self.plugins.len();
        debug!(mode = "sync", plugins = count, "processing document");

        for (index, plugin) in self.plugins.iter_mut().enumerate() {
            tree.attach_messages(messages.clone());
            let label = plugin.describe(index);
            let kind = plugin.kind_name();
            let PluginKind::Sync(apply) = &mut plugin.kind else {
                return Err(ProcessError::SyncPlugin {
                    plugin: label,
                    kind,
                });
            };
            debug!(plugin = %label, "applying plugin");
            tree = apply(tree).map_err(|source| ProcessError::Plugin {
                plugin: label,
                source,
            })?;
            if index + 1 != count && parsed {
                tree = tree.into_plain();
            }
        }

        tree.attach_messages(messages);
        self.last_options = Some(options.clone());
        Ok(LazyResult::new(tree, options))
    }

    /// Process asynchronously.
    ///
    /// Identical ordering and replacement semantics to
    /// [`Pipeline::process_sync`], but every plugin application is a
    /// suspension point: callback-style plugins suspend until their
    /// completion handle fires, future-returning plugins until the future
    /// settles. Any error short-circuits the pipeline.
    pub async fn process(
        &mut self,
        input: impl Into<Input>,
        options: ProcessOptions,
    ) -> Result<LazyResult, ProcessError> {
        let (mut tree, parsed) = initial_tree(input.into(), &options)?;
        let messages = Messages::new();
        let count = self.plugins.len();
        debug!(mode = "async", plugins = count, "processing document");

        for (index, plugin) in self.plugins.iter_mut().enumerate() {
            tree.attach_messages(messages.clone());
            let label = plugin.describe(index);
            debug!(plugin = %label, "applying plugin");
            let applied = match &mut plugin.kind {
                PluginKind::Sync(apply) => apply(tree),
                PluginKind::Future(apply) => apply(tree).await,
                PluginKind::Callback(apply) => {
                    let (done, completion) = Done::channel();
                    apply(tree, done);
                    match completion.await {
                        Ok(result) => result,
                        Err(_) => Err("completion handle dropped without being fired".into()),
                    }
                }
            };
            tree = applied.map_err(|source| ProcessError::Plugin {
                plugin: label,
                source,
            })?;
            if index + 1 != count && parsed {
                tree = tree.into_plain();
            }
        }

        tree.attach_messages(messages);
        self.last_options = Some(options.clone());
        Ok(LazyResult::new(tree, options))
    }
}

/// Obtain the starting tree: parse raw markup, or use an already-built tree
/// as-is.
fn initial_tree(input: Input, options: &ProcessOptions) -> Result<(Tree, bool), ProcessError> {
    match input {
        Input::Source(text) => {
            let tree = match &options.parser {
                Some(parser) => parser(&text, &options.parse_options)
                    .map_err(|source| ProcessError::Parse { source })?,
                None => arbor_parser::parse(&text, &options.parse_options),
            };
            Ok((tree, true))
        }
        Input::Tree(tree) => Ok((tree, false)),
    }
}
