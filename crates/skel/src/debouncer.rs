//! Change debouncing for file watching.
//!
//! Editors often emit several events for one save (truncate, write, rename).
//! The debouncer collapses them into one change per path once the path has
//! been quiet for the debounce duration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Thread-safe change debouncer.
pub(crate) struct ChangeDebouncer {
    pending: Mutex<HashMap<PathBuf, Instant>>,
    debounce_duration: Duration,
}

impl ChangeDebouncer {
    /// Create a new debouncer with the specified debounce duration.
    pub(crate) fn new(debounce_duration: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            debounce_duration,
        }
    }

    /// Record a change, pushing the path's deadline back.
    ///
    /// Called from watcher callbacks.
    pub(crate) fn record(&self, path: PathBuf) {
        let deadline = Instant::now() + self.debounce_duration;
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, deadline);
    }

    /// Drain paths that have passed their debounce deadline.
    pub(crate) fn drain_ready(&self) -> Vec<PathBuf> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        let mut ready = Vec::new();
        pending.retain(|path, deadline| {
            if *deadline <= now {
                ready.push(path.clone());
                false
            } else {
                true
            }
        });
        ready.sort();
        ready
    }
}
