//! Deterministic, sequential discovery of candidate Go files.
//!
//! Traversal is depth-first and sorted by file name at every level, so the
//! order of the returned paths (and therefore of the watch list) is stable
//! across platforms and runs.

use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::FileFilter;
use crate::error::{WatchError, WatchResult};

/// Directory the entry file lives in; `.` for a bare file name.
pub fn entry_dir(entry: &Path) -> PathBuf {
    match entry.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Path of `path` relative to `root`, components joined with `/`.
///
/// Paths produced by walking `root` always start with it; anything else is
/// returned unchanged. Backslashes inside a file name are kept as they are.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Checks whether a walked entry is a candidate source file.
///
/// Symlinks are not followed here: a `.go` symlink is a candidate even when
/// dangling, and fails later when it is read.
fn is_candidate(entry: &walkdir::DirEntry, filter: &FileFilter) -> bool {
    let path = entry.path();
    if entry.file_type().is_dir() {
        return false;
    }

    let is_test = entry
        .file_name()
        .to_str()
        .is_some_and(|name| filter.is_test_file(name));

    !is_test
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| filter.is_source_extension(ext))
}

/// Gathers every candidate source file under `root`, recursively.
///
/// Test files and files with another extension are skipped. The first
/// traversal error aborts the walk; no partial list is returned.
pub fn gather_source_files(root: &Path, filter: &FileFilter) -> WatchResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| WatchError::traverse(root, e))?;
        if is_candidate(&entry, filter) {
            debug!(file = %entry.path().display(), "candidate");
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
