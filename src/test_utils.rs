#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `debounced-input` unit tests.
//!
//! This module provides common test infrastructure used across multiple test modules.
//! It is only compiled during testing (`#[cfg(test)]`).

use crate::controller::{ChangeFn, FieldPath, change_fn};
use crate::scheduler::ManualScheduler;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// One call to the external change handler
#[derive(Debug, Clone, PartialEq)]
pub struct Commit<V> {
    /// Path the value was committed for
    pub path: FieldPath,
    /// Committed value, `None` for a clear
    pub value: Option<V>,
    /// Virtual time of the commit
    pub at: Duration,
}

/// Change handler that records every commit with the virtual time it happened
pub struct CommitRecorder<V> {
    scheduler: Arc<ManualScheduler>,
    commits: Arc<Mutex<Vec<Commit<V>>>>,
}

impl<V: Clone + Send + 'static> CommitRecorder<V> {
    /// Recorder stamping commits with `scheduler`'s clock
    pub fn new(scheduler: Arc<ManualScheduler>) -> Self {
        Self {
            scheduler,
            commits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A fresh handler feeding this recorder
    pub fn handler(&self) -> ChangeFn<V> {
        let scheduler = Arc::clone(&self.scheduler);
        let commits = Arc::clone(&self.commits);
        change_fn(move |path: &FieldPath, value: Option<V>| {
            commits.lock().push(Commit {
                path: path.clone(),
                value,
                at: scheduler.now(),
            });
        })
    }

    /// Everything recorded so far
    pub fn commits(&self) -> Vec<Commit<V>> {
        self.commits.lock().clone()
    }

    /// Recorded values only
    pub fn values(&self) -> Vec<Option<V>> {
        self.commits.lock().iter().map(|c| c.value.clone()).collect()
    }
}
