//! Session-scoped storage
//!
//! In-process key/value map standing in for platform session storage:
//! values live for the lifetime of the process and vanish with it.
//! The last-viewed quote index is kept here as a numeric string so the
//! persisted shape matches the durable store's string-keyed contract.

use crate::config::LAST_VIEWED_KEY;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Ephemeral per-session store
#[derive(Clone, Default)]
pub struct SessionStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: &str, value: String) {
        self.values
            .lock()
            .expect("session store lock poisoned")
            .insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("session store lock poisoned")
            .get(key)
            .cloned()
    }

    /// Record the full-collection index of the last displayed quote
    pub fn set_last_viewed(&self, index: usize) {
        self.set(LAST_VIEWED_KEY, index.to_string());
    }

    /// Index of the last displayed quote. `None` when nothing was viewed
    /// yet or the stored value does not parse as an index.
    pub fn last_viewed(&self) -> Option<usize> {
        self.get(LAST_VIEWED_KEY)?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_viewed_roundtrip() {
        let session = SessionStore::new();
        assert!(session.last_viewed().is_none());

        session.set_last_viewed(5);
        assert_eq!(session.last_viewed(), Some(5));

        session.set_last_viewed(0);
        assert_eq!(session.last_viewed(), Some(0));
    }

    #[test]
    fn test_non_numeric_value_reads_as_none() {
        let session = SessionStore::new();
        session.set(LAST_VIEWED_KEY, "not-a-number".to_string());
        assert!(session.last_viewed().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionStore::new();
        let clone = session.clone();
        clone.set_last_viewed(2);
        assert_eq!(session.last_viewed(), Some(2));
    }
}
