//! hardlink-mirror CLI entry point.
//!
//! Mirrors a source directory into a destination where every file is a hard
//! link to the original.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use args::Args;
use hardlink_mirror_tree::{MirrorOptions, ProgressReporter, mirror_tree};
use progress::ProgressLine;

fn main() {
    let args = Args::parse();
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = MirrorOptions::default();
    log::debug!("Options: {options:?}");

    output::print_header(&args.source, &args.destination, options.workers);

    let progress = Arc::new(ProgressLine::new());
    let started = Instant::now();

    let result = mirror_tree(
        &args.source,
        &args.destination,
        &options,
        Arc::clone(&progress) as Arc<dyn ProgressReporter>,
    );
    progress.finish();
    let summary = result?;

    output::print_summary(&progress.snapshot());
    for failure in &summary.link_failures {
        output::print_warning(&failure.to_string());
    }
    output::print_elapsed(started.elapsed());

    if !summary.is_complete() {
        return Err(format!(
            "{} file(s) could not be hard-linked",
            summary.link_failures.len()
        )
        .into());
    }

    Ok(())
}
