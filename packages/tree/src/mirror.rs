//! Run driver: validate roots, run the worker pool, collect the outcome.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hardlink_mirror_pool::WorkerPool;

use crate::error::{LinkFailure, MirrorError};
use crate::options::MirrorOptions;
use crate::progress::ProgressReporter;
use crate::replicate::TreeReplicator;

/// Outcome of a completed mirror run.
#[derive(Debug, Default)]
pub struct MirrorSummary {
    /// Files that could not be hard-linked.
    pub link_failures: Vec<LinkFailure>,
    /// Directories claimed from the frontier over the run.
    pub directories_processed: u64,
}

impl MirrorSummary {
    /// Whether every file was linked or already present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.link_failures.is_empty()
    }
}

/// Check that the roots can be mirrored.
///
/// The source must be an existing directory. Neither root may equal or lie
/// inside the other; the comparison is lexical on absolute, cleaned paths.
///
/// # Errors
///
/// * If the source does not exist or is not a directory
/// * If a root cannot be made absolute
/// * If the roots overlap
pub fn validate_roots(source: &Path, dest: &Path) -> Result<(), MirrorError> {
    match fs::metadata(source) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Err(MirrorError::SourceNotDirectory(source.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MirrorError::SourceNotFound(source.to_path_buf()));
        }
        Err(e) => {
            return Err(MirrorError::ResolveRootError {
                path: source.to_path_buf(),
                io_error: e,
            });
        }
    }

    let source_abs = absolute_clean(source)?;
    let dest_abs = absolute_clean(dest)?;

    if source_abs.starts_with(&dest_abs) || dest_abs.starts_with(&source_abs) {
        return Err(MirrorError::OverlappingRoots {
            source_root: source.to_path_buf(),
            dest_root: dest.to_path_buf(),
        });
    }

    Ok(())
}

fn absolute_clean(path: &Path) -> Result<PathBuf, MirrorError> {
    std::path::absolute(path)
        .map(path_clean::clean)
        .map_err(|e| MirrorError::ResolveRootError {
            path: path.to_path_buf(),
            io_error: e,
        })
}

/// Mirror `source` into `dest` with hard links.
///
/// Every directory under `source` is recreated under `dest` and every regular
/// file is hard-linked to its source. Existing destination entries are left
/// untouched. Events are sent to `reporter` as they happen.
///
/// # Errors
///
/// * If the roots are invalid (see [`validate_roots`])
/// * If a destination directory cannot be created or a source directory
///   cannot be read; the run stops and the tree is left as far as it got
/// * If a worker thread cannot be spawned or panics
pub fn mirror_tree(
    source: &Path,
    dest: &Path,
    options: &MirrorOptions,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<MirrorSummary, MirrorError> {
    validate_roots(source, dest)?;

    log::info!(
        "Mirroring {} -> {} with {} workers",
        source.display(),
        dest.display(),
        options.workers
    );

    let replicator = Arc::new(TreeReplicator::new(
        source,
        dest,
        reporter,
        options.idle_backoff,
    ));

    let pool = {
        let replicator = Arc::clone(&replicator);
        WorkerPool::new(options.workers, move || replicator.step())?
    };
    pool.start();
    pool.join()?;

    let summary = MirrorSummary {
        link_failures: replicator.finish()?,
        directories_processed: replicator.frontier().claims(),
    };

    log::info!(
        "Mirrored {} directories ({} link failures)",
        summary.directories_processed,
        summary.link_failures.len()
    );

    Ok(summary)
}
