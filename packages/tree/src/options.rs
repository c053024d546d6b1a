//! Run options.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::time::Duration;

use hardlink_mirror_pool::default_worker_count;

/// How long an idle worker sleeps when nothing is pending but other workers
/// are still processing.
pub const DEFAULT_IDLE_BACKOFF: Duration = Duration::from_micros(200);

/// Options for a mirror run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Number of worker threads.
    pub workers: usize,
    /// Sleep between polls while other workers may still enqueue directories.
    pub idle_backoff: Duration,
}

impl MirrorOptions {
    /// Use `workers` worker threads (clamped to at least one).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the idle backoff.
    #[must_use]
    pub const fn with_idle_backoff(mut self, idle_backoff: Duration) -> Self {
        self.idle_backoff = idle_backoff;
        self
    }
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            workers: default_worker_count(),
            idle_backoff: DEFAULT_IDLE_BACKOFF,
        }
    }
}
