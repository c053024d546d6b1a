//! Source-to-destination path translation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

/// Rewrite a path under `source_root` into the same position under `dest_root`.
///
/// The match is a leading, component-wise prefix: `/a/srcfoo` is not under
/// `/a/src`. The root itself maps to `dest_root` exactly, with no trailing
/// separator added. Nothing is checked on disk.
///
/// Returns `None` if `path` is not `source_root` or one of its descendants.
#[must_use]
pub fn translate(path: &Path, source_root: &Path, dest_root: &Path) -> Option<PathBuf> {
    let rest = path.strip_prefix(source_root).ok()?;

    if rest.as_os_str().is_empty() {
        Some(dest_root.to_path_buf())
    } else {
        Some(dest_root.join(rest))
    }
}

/// The pair of roots a run translates between.
///
/// Set once before workers start and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTranslator {
    source_root: PathBuf,
    dest_root: PathBuf,
}

impl PathTranslator {
    /// Create a translator for the given roots.
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
        }
    }

    /// The source root.
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// The destination root.
    #[must_use]
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Translate `path` from the source tree to the destination tree.
    ///
    /// See [`translate`].
    #[must_use]
    pub fn translate(&self, path: &Path) -> Option<PathBuf> {
        translate(path, &self.source_root, &self.dest_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_descendant() {
        let result = translate(Path::new("/src/a/b"), Path::new("/src"), Path::new("/dst"));
        assert_eq!(result, Some(PathBuf::from("/dst/a/b")));
    }

    #[test]
    fn test_translate_root_itself() {
        let result = translate(Path::new("/src"), Path::new("/src"), Path::new("/dst"));
        assert_eq!(result, Some(PathBuf::from("/dst")));
        assert_eq!(result.unwrap().as_os_str(), "/dst");
    }

    #[test]
    fn test_translate_unrelated_path() {
        assert_eq!(
            translate(Path::new("/other"), Path::new("/src"), Path::new("/dst")),
            None
        );
    }

    #[test]
    fn test_translate_rejects_sibling_with_shared_prefix() {
        assert_eq!(
            translate(Path::new("/a/srcfoo/x"), Path::new("/a/src"), Path::new("/dst")),
            None
        );
    }

    #[test]
    fn test_translate_only_leading_occurrence() {
        let result = translate(
            Path::new("/src/nested/src/file"),
            Path::new("/src"),
            Path::new("/dst"),
        );
        assert_eq!(result, Some(PathBuf::from("/dst/nested/src/file")));
    }

    #[test]
    fn test_translate_relative_roots() {
        let translator = PathTranslator::new("data/in", "../out");
        assert_eq!(
            translator.translate(Path::new("data/in/x.txt")),
            Some(PathBuf::from("../out/x.txt"))
        );
        assert_eq!(translator.translate(Path::new("data/x.txt")), None);
    }
}
