//! Concurrent hard-link replication of directory trees.
//!
//! This crate mirrors a source directory into a destination where every
//! regular file is a hard link to its source and every directory is a real
//! directory:
//!
//! * [`translate`] rewrites source-rooted paths into destination-rooted ones
//! * [`Frontier`] holds discovered-but-unfinished directories for all workers
//! * [`TreeReplicator`] processes one directory level per step
//! * [`mirror_tree`] drives a run on a fixed pool of worker threads
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hardlink_mirror_tree::{MirrorOptions, ProgressCounters, mirror_tree};
//!
//! let counters = Arc::new(ProgressCounters::new());
//! let summary = mirror_tree(source, dest, &MirrorOptions::default(), counters.clone())?;
//! let snapshot = counters.snapshot();
//! println!("{}/{} files linked", snapshot.files_linked, snapshot.files_total());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod frontier;
mod mirror;
mod options;
mod progress;
mod replicate;
mod translate;

pub use error::{LinkFailure, MirrorError};
pub use frontier::Frontier;
pub use mirror::{MirrorSummary, mirror_tree, validate_roots};
pub use options::{DEFAULT_IDLE_BACKOFF, MirrorOptions};
pub use progress::{ProgressCounters, ProgressEvent, ProgressReporter, ProgressSnapshot};
pub use replicate::TreeReplicator;
pub use translate::{PathTranslator, translate};
