//! Live progress line for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hardlink_mirror_tree::{ProgressCounters, ProgressEvent, ProgressReporter, ProgressSnapshot};
use indicatif::{ProgressBar, ProgressStyle};

/// Minimum milliseconds between message redraws.
const REDRAW_INTERVAL_MS: u64 = 100;

/// `last_redraw_ms` value before the first redraw.
const NEVER_DRAWN: u64 = u64::MAX;

/// Counts events and shows them on a spinner line.
pub struct ProgressLine {
    counters: ProgressCounters,
    bar: ProgressBar,
    /// Milliseconds since the bar started at the last message redraw.
    last_redraw_ms: AtomicU64,
}

impl ProgressLine {
    /// Create and start the spinner.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid progress bar template"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            counters: ProgressCounters::new(),
            bar,
            last_redraw_ms: AtomicU64::new(NEVER_DRAWN),
        }
    }

    /// Redraw the message if it was never drawn or is older than the interval.
    fn maybe_redraw(&self) {
        let now = u64::try_from(self.bar.elapsed().as_millis()).unwrap_or(u64::MAX - 1);
        let last = self.last_redraw_ms.load(Ordering::Relaxed);

        let due = last == NEVER_DRAWN || now.saturating_sub(last) >= REDRAW_INTERVAL_MS;

        // One worker wins each redraw slot
        if due
            && self
                .last_redraw_ms
                .compare_exchange(last, now, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
        {
            self.bar.set_message(format_counts(&self.counters.snapshot()));
        }
    }

    /// Current counts.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.counters.snapshot()
    }

    /// Stop the spinner and clear the line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressLine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ProgressLine {
    fn report(&self, event: ProgressEvent) {
        self.counters.report(event);
        self.maybe_redraw();
    }
}

/// Format counts as `Files: new/total  Folders: new/total`.
#[must_use]
pub fn format_counts(snapshot: &ProgressSnapshot) -> String {
    format!(
        "Files: {}/{}  Folders: {}/{}",
        snapshot.files_linked,
        snapshot.files_total(),
        snapshot.dirs_created,
        snapshot.dirs_total()
    )
}
