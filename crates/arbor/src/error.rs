//! Pipeline error taxonomy.
//!
//! The engine performs no retries and no error translation: plugin and
//! collaborator failures are routed to the caller unchanged. The only
//! locally-synthesized error is the sync-mode violation.

use crate::plugin::BoxError;

/// Error returned by [`Pipeline::process`](crate::Pipeline::process) and
/// [`Pipeline::process_sync`](crate::Pipeline::process_sync).
///
/// Renderer failures are not represented here: rendering is lazy and
/// surfaces at [`LazyResult::html`](crate::LazyResult::html) instead.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// An asynchronous plugin was registered but synchronous processing was
    /// requested. Fatal; never silently downgraded to async behavior.
    #[error("cannot process in sync mode because of {kind} plugin `{plugin}`")]
    SyncPlugin {
        /// Label or registration index of the offending plugin.
        plugin: String,
        /// The plugin's calling convention.
        kind: &'static str,
    },

    /// A plugin failed (returned an error, fired its completion handle with
    /// one, or dropped the handle unfired). Remaining plugins do not run.
    #[error("plugin `{plugin}` failed: {source}")]
    Plugin {
        /// Label or registration index of the failed plugin.
        plugin: String,
        #[source]
        source: BoxError,
    },

    /// The parser override failed before any plugin ran.
    #[error("parser failed: {source}")]
    Parse {
        #[source]
        source: BoxError,
    },
}
