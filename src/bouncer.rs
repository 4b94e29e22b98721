use std::collections::HashSet;
use std::sync::Mutex;

/// Keys of messages that were already logged.
///
/// Shared by everything that resolves versions in one process so that a warning
/// (dirty working tree, disabled extension) or a per-coordinate summary shows up
/// only once.
#[derive(Debug, Default)]
pub struct LogBouncer {
    seen: Mutex<HashSet<String>>,
}

impl LogBouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`; returns true only for the first caller to record it
    pub fn first_time(&self, key: impl Into<String>) -> bool {
        let mut seen = self
            .seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        seen.insert(key.into())
    }
}
