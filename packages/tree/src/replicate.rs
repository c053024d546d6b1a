//! Per-directory replication step.
//!
//! One step claims a single directory from the [`Frontier`], creates its
//! destination, hard-links its regular files and enqueues its subdirectories.
//! Deeper levels are reached by re-enqueueing, never by recursion, so tree
//! depth does not grow the stack.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::{LinkFailure, MirrorError};
use crate::frontier::Frontier;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::translate::PathTranslator;

/// Replicates a source tree into a destination tree one directory per step.
pub struct TreeReplicator {
    translator: PathTranslator,
    frontier: Frontier,
    reporter: Arc<dyn ProgressReporter>,
    idle_backoff: Duration,
    aborted: AtomicBool,
    fatal: Mutex<Option<MirrorError>>,
    link_failures: Mutex<Vec<LinkFailure>>,
}

impl std::fmt::Debug for TreeReplicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeReplicator")
            .field("translator", &self.translator)
            .field("frontier", &self.frontier)
            .field("aborted", &self.aborted)
            .finish_non_exhaustive()
    }
}

impl TreeReplicator {
    /// Record both roots and seed the frontier with the source root.
    ///
    /// Must be called before any worker runs [`TreeReplicator::step`].
    #[must_use]
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        reporter: Arc<dyn ProgressReporter>,
        idle_backoff: Duration,
    ) -> Self {
        let translator = PathTranslator::new(source_root, dest_root);
        let frontier = Frontier::new();
        frontier.seed(translator.source_root().to_path_buf());

        Self {
            translator,
            frontier,
            reporter,
            idle_backoff,
            aborted: AtomicBool::new(false),
            fatal: Mutex::new(None),
            link_failures: Mutex::new(Vec::new()),
        }
    }

    /// The shared frontier.
    #[must_use]
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The root translator.
    #[must_use]
    pub const fn translator(&self) -> &PathTranslator {
        &self.translator
    }

    /// Whether a fatal error has stopped the run.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    /// Process at most one directory and report whether work remains.
    ///
    /// Returns `false` once the frontier is empty or after a fatal error;
    /// the error is kept for [`TreeReplicator::finish`].
    pub fn step(&self) -> bool {
        if self.is_aborted() {
            return false;
        }

        if let Some(path) = self.frontier.claim() {
            if let Err(e) = self.process(&path) {
                self.abort(e);
                return false;
            }
            self.frontier.release(&path);
        } else if self.frontier.has_work() {
            // Another worker may still enqueue children
            self.idle();
        }

        self.frontier.has_work()
    }

    /// Take the run outcome after all workers have exited.
    ///
    /// # Errors
    ///
    /// * The fatal error that aborted the run, if any
    pub fn finish(&self) -> Result<Vec<LinkFailure>, MirrorError> {
        if let Some(error) = self.fatal.lock().take() {
            return Err(error);
        }
        Ok(std::mem::take(&mut *self.link_failures.lock()))
    }

    fn process(&self, path: &Path) -> Result<(), MirrorError> {
        match fs::symlink_metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Skipping vanished directory {}", path.display());
                return Ok(());
            }
            Err(e) => {
                return Err(MirrorError::ReadDirError {
                    path: path.to_path_buf(),
                    io_error: e,
                });
            }
        }

        log::debug!("Processing {}", path.display());

        let dest = self.translate(path)?;
        if dest.is_dir() {
            self.reporter.report(ProgressEvent::DirExists);
        } else {
            fs::create_dir_all(&dest).map_err(|e| MirrorError::CreateDirError {
                path: dest.clone(),
                io_error: e,
            })?;
            log::trace!("Created directory {}", dest.display());
            self.reporter.report(ProgressEvent::DirCreated);
        }

        let read_dir_error = |e: std::io::Error| MirrorError::ReadDirError {
            path: path.to_path_buf(),
            io_error: e,
        };

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Directory vanished before listing: {}", path.display());
                return Ok(());
            }
            Err(e) => return Err(read_dir_error(e)),
        };

        for entry in entries {
            let entry = entry.map_err(read_dir_error)?;
            let file_type = entry.file_type().map_err(read_dir_error)?;
            let child = entry.path();

            if file_type.is_dir() {
                self.frontier.enqueue(child);
            } else if file_type.is_file() {
                let target = self.translate(&child)?;
                self.link_file(&child, &target);
            } else {
                log::debug!(
                    "Skipping {} (not a regular file or directory)",
                    child.display()
                );
            }
        }

        Ok(())
    }

    fn link_file(&self, source: &Path, target: &Path) {
        if fs::symlink_metadata(target).is_ok() {
            self.reporter.report(ProgressEvent::FileExists);
            return;
        }

        match fs::hard_link(source, target) {
            Ok(()) => {
                log::trace!("Linked {} -> {}", target.display(), source.display());
                self.reporter.report(ProgressEvent::FileLinked);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                self.reporter.report(ProgressEvent::FileExists);
            }
            Err(e) if e.kind() == ErrorKind::NotFound && !source.exists() => {
                log::debug!("Skipping vanished file {}", source.display());
            }
            Err(e) => {
                log::warn!(
                    "Failed to link {} -> {}: {e}",
                    target.display(),
                    source.display()
                );
                self.reporter.report(ProgressEvent::LinkFailed);
                self.link_failures.lock().push(LinkFailure {
                    source_path: source.to_path_buf(),
                    target_path: target.to_path_buf(),
                    io_error: e,
                });
            }
        }
    }

    fn translate(&self, path: &Path) -> Result<PathBuf, MirrorError> {
        self.translator
            .translate(path)
            .ok_or_else(|| MirrorError::OutsideSourceRoot {
                path: path.to_path_buf(),
            })
    }

    fn abort(&self, error: MirrorError) {
        log::error!("Aborting run: {error}");
        self.fatal.lock().get_or_insert(error);
        self.aborted.store(true, Ordering::Release);
    }

    fn idle(&self) {
        if self.idle_backoff.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(self.idle_backoff);
        }
    }
}
