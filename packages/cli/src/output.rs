//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use hardlink_mirror_tree::ProgressSnapshot;

/// Print the roots being mirrored.
pub fn print_header(source: &Path, destination: &Path, workers: usize) {
    println!(
        "{} {} {} {}",
        "Mirroring".bold(),
        source.display().to_string().cyan(),
        "->".dimmed(),
        destination.display().to_string().cyan()
    );
    println!("{}", format!("Using {workers} workers").dimmed());
}

/// Print final counts.
pub fn print_summary(snapshot: &ProgressSnapshot) {
    println!(
        "{} Files: {} linked, {} already present{}",
        "✓".green(),
        snapshot.files_linked,
        snapshot.files_existing,
        if snapshot.files_failed > 0 {
            format!(", {} failed", snapshot.files_failed)
                .red()
                .to_string()
        } else {
            String::new()
        }
    );
    println!(
        "{} Folders: {} created, {} already present",
        "✓".green(),
        snapshot.dirs_created,
        snapshot.dirs_existing
    );
}

/// Print wall-clock time for the run.
pub fn print_elapsed(elapsed: Duration) {
    println!("Time cost: {}s", elapsed.as_secs());
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
