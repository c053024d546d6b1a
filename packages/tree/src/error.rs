//! Error types for mirror runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use hardlink_mirror_pool::PoolError;
use thiserror::Error;

/// Errors that stop a mirror run.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The source root does not exist.
    #[error("Source does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The source root is not a directory.
    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    /// A root could not be resolved to an absolute path.
    #[error("Failed to resolve {}: {io_error}", path.display())]
    ResolveRootError {
        /// The root as given.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        io_error: std::io::Error,
    },

    /// One root is the other or lies inside it.
    #[error(
        "Source {} and destination {} overlap",
        source_root.display(),
        dest_root.display()
    )]
    OverlappingRoots {
        /// The source root.
        source_root: PathBuf,
        /// The destination root.
        dest_root: PathBuf,
    },

    /// A traversed path could not be translated to the destination tree.
    #[error("Path is outside the source root: {}", path.display())]
    OutsideSourceRoot {
        /// The untranslatable path.
        path: PathBuf,
    },

    /// Failed to create a destination directory.
    #[error("Failed to create directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        io_error: std::io::Error,
    },

    /// Failed to enumerate a source directory.
    #[error("Failed to read directory {}: {io_error}", path.display())]
    ReadDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        io_error: std::io::Error,
    },

    /// Worker pool error.
    #[error("Worker pool error: {0}")]
    Pool(#[from] PoolError),
}

/// A file that could not be hard-linked.
///
/// These do not stop the run; they are collected and returned in the summary.
#[derive(Debug, Error)]
#[error("Failed to link {} to {}: {io_error}", source_path.display(), target_path.display())]
pub struct LinkFailure {
    /// Source file path.
    pub source_path: PathBuf,
    /// Destination path.
    pub target_path: PathBuf,
    /// The underlying IO error.
    #[source]
    pub io_error: std::io::Error,
}
