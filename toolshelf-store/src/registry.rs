//! Tracks how many observers are open per key.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-key observer counts, owned by one store.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    counts: Mutex<HashMap<String, usize>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        // Poisoning is ignored: unregister runs from Drop.
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a newly opened observer of `key`.
    pub fn register(&self, key: &str) {
        let mut counts = self.lock();
        *counts.entry(key.to_string()).or_default() += 1;
    }

    /// Records that an observer of `key` was dropped.
    pub fn unregister(&self, key: &str) {
        let mut counts = self.lock();
        if let Some(count) = counts.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                counts.remove(key);
            }
        }
    }

    /// Number of live observers of `key`.
    pub fn count(&self, key: &str) -> usize {
        self.lock().get(key).copied().unwrap_or(0)
    }

    /// Keys with at least one live observer, sorted.
    pub fn observed_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}
