//! Worker pool lifecycle: spawn, gated start, join.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::error::PoolError;
use crate::gate::StartGate;

/// Worker count used when the CPU count cannot be detected.
pub const FALLBACK_WORKER_COUNT: usize = 4;

/// Number of workers to use when none is requested.
///
/// Uses the logical CPU count, or [`FALLBACK_WORKER_COUNT`] if it is reported
/// as zero.
#[must_use]
pub fn default_worker_count() -> usize {
    match num_cpus::get() {
        0 => FALLBACK_WORKER_COUNT,
        n => n,
    }
}

/// State shared between the pool handle and its workers.
#[derive(Debug, Default)]
struct Shared {
    gate: StartGate,
    /// Set when a worker panics or the pool is dropped before joining.
    halted: AtomicBool,
}

/// Raises the halt flag if the owning worker unwinds.
struct HaltOnPanic<'a>(&'a Shared);

impl Drop for HaltOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.halted.store(true, Ordering::Release);
        }
    }
}

/// A fixed set of threads repeatedly running one step function.
///
/// Workers are spawned by [`WorkerPool::new`] but wait at a start gate until
/// [`WorkerPool::start`] is called, so they all enter their loop together.
/// A worker exits when its own call to the step function returns `false`.
#[derive(Debug)]
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
    shared: Arc<Shared>,
}

impl WorkerPool {
    /// Spawn `count` workers (at least one) that will run `step` once started.
    ///
    /// # Errors
    ///
    /// * If a worker thread cannot be spawned. Workers spawned before the
    ///   failure are released and joined.
    pub fn new<F>(count: usize, step: F) -> Result<Self, PoolError>
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        let count = count.max(1);
        let step = Arc::new(step);
        let mut pool = Self {
            handles: Vec::with_capacity(count),
            shared: Arc::new(Shared::default()),
        };

        for id in 0..count {
            let step = Arc::clone(&step);
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("mirror-worker-{id}"))
                .spawn(move || worker_loop(id, &shared, &*step))
                .map_err(|e| PoolError::SpawnError { id, io_error: e })?;
            pool.handles.push(handle);
        }

        log::debug!("Spawned {count} workers");
        Ok(pool)
    }

    /// Number of workers in the pool.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Release all workers from the start gate.
    ///
    /// Calling this more than once has no further effect.
    pub fn start(&self) {
        if self.shared.gate.is_open() {
            return;
        }
        log::debug!("Starting {} workers", self.handles.len());
        self.shared.gate.open();
    }

    /// Block until every worker has exited.
    ///
    /// # Errors
    ///
    /// * If any worker panicked. All workers are still joined; the first
    ///   panicked worker is reported.
    pub fn join(mut self) -> Result<(), PoolError> {
        let mut panicked = None;

        for (id, handle) in std::mem::take(&mut self.handles).into_iter().enumerate() {
            if handle.join().is_err() {
                log::error!("Worker {id} panicked");
                panicked.get_or_insert(id);
            }
        }

        match panicked {
            Some(id) => Err(PoolError::WorkerPanicked { id }),
            None => Ok(()),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.handles.is_empty() {
            return;
        }

        // Dropped without join: stop workers before they take a step
        self.shared.halted.store(true, Ordering::Release);
        self.shared.gate.open();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop<F>(id: usize, shared: &Shared, step: &F)
where
    F: Fn() -> bool,
{
    let _halt = HaltOnPanic(shared);
    shared.gate.wait();

    let mut steps: u64 = 0;
    while !shared.halted.load(Ordering::Acquire) {
        steps += 1;
        if !step() {
            break;
        }
    }

    log::debug!("Worker {id} exiting after {steps} steps");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[test]
    fn test_default_worker_count_nonzero() {
        assert!(default_worker_count() >= 1);
    }

    #[test]
    fn test_zero_workers_clamped_to_one() {
        let pool = WorkerPool::new(0, || false).unwrap();
        assert_eq!(pool.worker_count(), 1);
        pool.start();
        pool.join().unwrap();
    }

    #[test]
    fn test_workers_wait_for_start() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let pool = WorkerPool::new(4, move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            false
        })
        .unwrap();

        thread::sleep(Duration::from_millis(50));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        pool.start();
        pool.start();
        pool.join().unwrap();

        // Each worker exits after its first false
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_workers_run_until_step_reports_no_work() {
        let remaining = Arc::new(AtomicUsize::new(1000));
        let done = Arc::new(AtomicUsize::new(0));
        let remaining_clone = Arc::clone(&remaining);
        let done_clone = Arc::clone(&done);

        let pool = WorkerPool::new(8, move || {
            let took = remaining_clone
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if took {
                done_clone.fetch_add(1, Ordering::SeqCst);
            }
            remaining_clone.load(Ordering::SeqCst) > 0
        })
        .unwrap();

        pool.start();
        pool.join().unwrap();

        assert_eq!(remaining.load(Ordering::SeqCst), 0);
        assert_eq!(done.load(Ordering::SeqCst), 1000);
    }

    #[test]
    fn test_panicking_worker_halts_pool() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let pool = WorkerPool::new(4, move || {
            assert!(
                calls_clone.fetch_add(1, Ordering::SeqCst) != 100,
                "step failed"
            );
            true
        })
        .unwrap();

        pool.start();
        let result = pool.join();

        assert!(matches!(result, Err(PoolError::WorkerPanicked { .. })));
    }

    #[test]
    fn test_drop_without_start_does_not_run_steps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let pool = WorkerPool::new(3, move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();
        drop(pool);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
