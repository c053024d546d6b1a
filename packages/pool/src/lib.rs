//! Fixed-size worker pool for hardlink-mirror.
//!
//! Workers are spawned up front and held at a start gate until
//! [`WorkerPool::start`] is called. Each worker then calls the supplied step
//! function in a loop and exits as soon as its own call returns `false`.
//!
//! # Example
//!
//! ```rust,ignore
//! use hardlink_mirror_pool::{WorkerPool, default_worker_count};
//!
//! let pool = WorkerPool::new(default_worker_count(), move || replicator.step())?;
//! pool.start();
//! pool.join()?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod gate;
mod pool;

pub use error::PoolError;
pub use pool::{FALLBACK_WORKER_COUNT, WorkerPool, default_worker_count};
