//! The watch list accumulator.

use serde::Serialize;

/// Ordered paths a build must watch, relative to the entry directory.
///
/// The entry's own path is always first. Later entries may repeat: a file
/// is pushed once per matching declaration, not once per file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WatchList {
    paths: Vec<String>,
}

impl WatchList {
    /// Starts a watch list holding only the entry path.
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            paths: vec![entry.into()],
        }
    }

    /// Appends a related file.
    pub fn push(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    /// The entry path the list was started with.
    pub fn entry(&self) -> &str {
        &self.paths[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Pairs with `len` for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
