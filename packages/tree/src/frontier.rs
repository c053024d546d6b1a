//! Shared traversal frontier.
//!
//! Tracks directories that have been discovered but not yet processed
//! (`pending`) and directories currently held by a worker (`processing`).
//! Both containers sit behind one lock so every operation observes and
//! mutates them as a pair. The lock is never held across filesystem I/O.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct FrontierState {
    pending: VecDeque<PathBuf>,
    processing: HashSet<PathBuf>,
    claims: u64,
}

/// Discovered-but-unfinished directories, shared by all workers.
///
/// A path moves `pending -> processing -> done`; done is implicit in its
/// absence from both containers. The run is complete once both are empty.
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
}

impl Frontier {
    /// Create an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root path before any worker starts.
    pub fn seed(&self, path: PathBuf) {
        log::debug!("Seeding frontier with {}", path.display());
        self.enqueue(path);
    }

    /// Pop the oldest pending path and mark it as processing.
    ///
    /// Returns `None` if nothing is pending, even if other paths are still
    /// being processed.
    ///
    /// # Panics
    ///
    /// * If the popped path is already being processed
    pub fn claim(&self) -> Option<PathBuf> {
        let mut state = self.state.lock();
        let path = state.pending.pop_front()?;

        assert!(
            state.processing.insert(path.clone()),
            "frontier invariant violated: {} claimed while already processing",
            path.display()
        );
        state.claims += 1;

        Some(path)
    }

    /// Append a newly discovered path to the pending queue.
    pub fn enqueue(&self, path: PathBuf) {
        let mut state = self.state.lock();
        debug_assert!(
            !state.processing.contains(&path),
            "frontier invariant violated: {} enqueued while processing",
            path.display()
        );
        state.pending.push_back(path);
    }

    /// Mark a claimed path as done.
    ///
    /// # Panics
    ///
    /// * If `path` is not currently being processed
    pub fn release(&self, path: &Path) {
        let mut state = self.state.lock();
        assert!(
            state.processing.remove(path),
            "frontier invariant violated: {} released but not processing",
            path.display()
        );
    }

    /// Whether anything is pending or still being processed.
    #[must_use]
    pub fn has_work(&self) -> bool {
        let state = self.state.lock();
        !state.pending.is_empty() || !state.processing.is_empty()
    }

    /// Number of pending paths.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Number of paths currently being processed.
    #[must_use]
    pub fn processing_len(&self) -> usize {
        self.state.lock().processing.len()
    }

    /// Total successful claims over the frontier's lifetime.
    #[must_use]
    pub fn claims(&self) -> u64 {
        self.state.lock().claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_claim_empty() {
        let frontier = Frontier::new();
        assert_eq!(frontier.claim(), None);
        assert!(!frontier.has_work());
    }

    #[test]
    fn test_claim_is_fifo() {
        let frontier = Frontier::new();
        frontier.seed(PathBuf::from("/root"));
        frontier.enqueue(PathBuf::from("/root/a"));
        frontier.enqueue(PathBuf::from("/root/b"));

        assert_eq!(frontier.claim(), Some(PathBuf::from("/root")));
        assert_eq!(frontier.claim(), Some(PathBuf::from("/root/a")));
        assert_eq!(frontier.claim(), Some(PathBuf::from("/root/b")));
        assert_eq!(frontier.claim(), None);
        assert_eq!(frontier.claims(), 3);
    }

    #[test]
    fn test_has_work_while_processing() {
        let frontier = Frontier::new();
        frontier.seed(PathBuf::from("/root"));
        assert!(frontier.has_work());

        let path = frontier.claim().unwrap();
        assert_eq!(frontier.pending_len(), 0);
        assert_eq!(frontier.processing_len(), 1);

        // Nothing to claim, but the run is not done
        assert_eq!(frontier.claim(), None);
        assert!(frontier.has_work());

        frontier.enqueue(path.join("child"));
        frontier.release(&path);
        assert!(frontier.has_work());

        let child = frontier.claim().unwrap();
        frontier.release(&child);
        assert!(!frontier.has_work());
    }

    #[test]
    #[should_panic(expected = "released but not processing")]
    fn test_release_unclaimed_panics() {
        let frontier = Frontier::new();
        frontier.release(Path::new("/never/claimed"));
    }

    #[test]
    #[should_panic(expected = "released but not processing")]
    fn test_double_release_panics() {
        let frontier = Frontier::new();
        frontier.seed(PathBuf::from("/root"));
        let path = frontier.claim().unwrap();
        frontier.release(&path);
        frontier.release(&path);
    }

    #[test]
    #[should_panic(expected = "already processing")]
    fn test_duplicate_claim_panics() {
        let frontier = Frontier::new();
        frontier.seed(PathBuf::from("/root"));
        frontier.state.lock().pending.push_back(PathBuf::from("/root"));

        let _first = frontier.claim();
        let _second = frontier.claim();
    }

    #[test]
    fn test_concurrent_claims_are_exclusive() {
        let frontier = Arc::new(Frontier::new());
        for i in 0..1000 {
            frontier.enqueue(PathBuf::from(format!("/p/{i}")));
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let frontier = Arc::clone(&frontier);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(path) = frontier.claim() {
                        frontier.release(&path);
                        seen.push(path);
                    }
                    seen
                })
            })
            .collect();

        let mut all: Vec<PathBuf> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        all.dedup();

        assert_eq!(all.len(), 1000);
        assert_eq!(frontier.claims(), 1000);
        assert!(!frontier.has_work());
    }
}
