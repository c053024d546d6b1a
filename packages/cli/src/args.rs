//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;

/// CLI arguments for hardlink-mirror.
#[derive(Debug, Parser)]
#[command(
    name = "hardlink-mirror",
    about = "Mirror a directory tree into another location using hard links",
    override_usage = "hardlink-mirror <SOURCE> <DESTINATION>",
    version
)]
pub struct Args {
    /// Source folder to mirror.
    #[arg(index = 1)]
    pub source: PathBuf,

    /// Destination folder that receives the links.
    #[arg(index = 2)]
    pub destination: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals() {
        let args = Args::try_parse_from(["hardlink-mirror", "/data/in", "/data/out"]).unwrap();
        assert_eq!(args.source, PathBuf::from("/data/in"));
        assert_eq!(args.destination, PathBuf::from("/data/out"));
    }

    #[test]
    fn test_missing_destination_rejected() {
        assert!(Args::try_parse_from(["hardlink-mirror", "/data/in"]).is_err());
    }

    #[test]
    fn test_no_arguments_rejected() {
        assert!(Args::try_parse_from(["hardlink-mirror"]).is_err());
    }

    #[test]
    fn test_extra_argument_rejected() {
        assert!(Args::try_parse_from(["hardlink-mirror", "/a", "/b", "/c"]).is_err());
    }
}
