//! Shared message sequence for out-of-band plugin communication.
//!
//! Plugins append arbitrary records (e.g. dependency declarations) that the
//! pipeline carries, unfiltered, into the final result. The sequence lives
//! behind a cheaply-cloneable handle so it stays reachable from the tree
//! across arbitrary tree replacement.

use std::sync::{Arc, Mutex, PoisonError};

/// An opaque, plugin-defined record. No schema is enforced.
pub type Message = serde_json::Value;

/// Shared handle to an ordered message sequence.
///
/// Cloning produces another handle to the same underlying sequence. One
/// sequence is created per `process` invocation.
#[derive(Debug, Clone, Default)]
pub struct Messages(Arc<Mutex<Vec<Message>>>);

impl Messages {
    /// Create an empty message sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Insertion order is preserved.
    pub fn push(&self, message: Message) {
        self.lock().push(message);
    }

    /// Snapshot of the current messages, in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Message> {
        self.lock().clone()
    }

    /// Number of accumulated messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when no messages have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether two handles refer to the same underlying sequence.
    #[must_use]
    pub fn same_sequence(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        // A panicking plugin must not wedge later reads of the sequence.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let messages = Messages::new();
        messages.push(json!({"type": "dependency", "file": "a.html"}));
        messages.push(json!({"type": "dependency", "file": "b.html"}));
        assert_eq!(
            messages.to_vec(),
            vec![
                json!({"type": "dependency", "file": "a.html"}),
                json!({"type": "dependency", "file": "b.html"}),
            ]
        );
    }

    #[test]
    fn test_clone_shares_sequence() {
        let messages = Messages::new();
        let handle = messages.clone();
        handle.push(json!("seen"));
        assert_eq!(messages.len(), 1);
        assert!(messages.same_sequence(&handle));
        assert!(!messages.same_sequence(&Messages::new()));
    }

    #[test]
    fn test_empty() {
        let messages = Messages::new();
        assert!(messages.is_empty());
        messages.push(json!(1));
        assert!(!messages.is_empty());
    }
}
