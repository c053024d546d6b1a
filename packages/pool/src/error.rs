//! Error types for the worker pool.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

/// Errors that can occur while running the worker pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The OS refused to spawn a worker thread.
    #[error("Failed to spawn worker {id}: {io_error}")]
    SpawnError {
        /// Index of the worker that could not be started.
        id: usize,
        /// The underlying IO error.
        #[source]
        io_error: std::io::Error,
    },

    /// A worker thread panicked.
    #[error("Worker {id} panicked")]
    WorkerPanicked {
        /// Index of the worker that panicked.
        id: usize,
    },
}
