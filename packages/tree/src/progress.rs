//! Progress events and counters for mirror runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicU64, Ordering};

/// Something that happened to one entry during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressEvent {
    /// A file was hard-linked into the destination.
    FileLinked,
    /// The destination file already existed and was left alone.
    FileExists,
    /// A hard link could not be created.
    LinkFailed,
    /// A destination directory was created.
    DirCreated,
    /// The destination directory already existed.
    DirExists,
}

/// Receives progress events from worker threads.
///
/// Called concurrently from every worker, outside any traversal lock.
pub trait ProgressReporter: Send + Sync {
    /// Record one event.
    fn report(&self, event: ProgressEvent);
}

impl ProgressReporter for () {
    fn report(&self, _event: ProgressEvent) {}
}

/// Point-in-time copy of [`ProgressCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Files newly hard-linked.
    pub files_linked: u64,
    /// Files already present in the destination.
    pub files_existing: u64,
    /// Files that could not be linked.
    pub files_failed: u64,
    /// Directories newly created.
    pub dirs_created: u64,
    /// Directories already present in the destination.
    pub dirs_existing: u64,
}

impl ProgressSnapshot {
    /// Every file seen so far.
    #[must_use]
    pub const fn files_total(&self) -> u64 {
        self.files_linked + self.files_existing + self.files_failed
    }

    /// Every directory processed so far.
    #[must_use]
    pub const fn dirs_total(&self) -> u64 {
        self.dirs_created + self.dirs_existing
    }
}

/// Thread-safe event counters using atomics.
///
/// Independent of the frontier lock, so counting never serializes traversal.
#[derive(Debug, Default)]
pub struct ProgressCounters {
    files_linked: AtomicU64,
    files_existing: AtomicU64,
    files_failed: AtomicU64,
    dirs_created: AtomicU64,
    dirs_existing: AtomicU64,
}

impl ProgressCounters {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            files_linked: self.files_linked.load(Ordering::Relaxed),
            files_existing: self.files_existing.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            dirs_created: self.dirs_created.load(Ordering::Relaxed),
            dirs_existing: self.dirs_existing.load(Ordering::Relaxed),
        }
    }
}

impl ProgressReporter for ProgressCounters {
    fn report(&self, event: ProgressEvent) {
        let counter = match event {
            ProgressEvent::FileLinked => &self.files_linked,
            ProgressEvent::FileExists => &self.files_existing,
            ProgressEvent::LinkFailed => &self.files_failed,
            ProgressEvent::DirCreated => &self.dirs_created,
            ProgressEvent::DirExists => &self.dirs_existing,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let counters = ProgressCounters::new();
        counters.report(ProgressEvent::FileLinked);
        counters.report(ProgressEvent::FileLinked);
        counters.report(ProgressEvent::FileExists);
        counters.report(ProgressEvent::LinkFailed);
        counters.report(ProgressEvent::DirCreated);
        counters.report(ProgressEvent::DirExists);
        counters.report(ProgressEvent::DirExists);

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.files_linked, 2);
        assert_eq!(snapshot.files_existing, 1);
        assert_eq!(snapshot.files_failed, 1);
        assert_eq!(snapshot.files_total(), 4);
        assert_eq!(snapshot.dirs_created, 1);
        assert_eq!(snapshot.dirs_existing, 2);
        assert_eq!(snapshot.dirs_total(), 3);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = ProgressCounters::new().snapshot();
        assert_eq!(snapshot, ProgressSnapshot::default());
        assert_eq!(snapshot.files_total(), 0);
    }
}
