//! Analyzer configuration.

use glob::Pattern;
use serde::Deserialize;

use crate::error::{WatchError, WatchResult};

/// Default glob for Go test files, matched against the file name.
pub const DEFAULT_TEST_PATTERN: &str = "*test.go";

/// Default extension (without the dot) of Go source files.
pub const DEFAULT_SOURCE_EXTENSION: &str = "go";

/// Settings controlling which files become candidates.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Glob matched against file names; matches are skipped as test files.
    pub test_pattern: String,
    /// Extension identifying source files.
    pub source_extension: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            test_pattern: DEFAULT_TEST_PATTERN.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Validate and compile the configuration into a file filter.
    pub fn compile(&self) -> WatchResult<FileFilter> {
        let test_pattern = Pattern::new(&self.test_pattern).map_err(|e| {
            WatchError::config(format!(
                "invalid test-file pattern '{}': {}",
                self.test_pattern, e
            ))
        })?;

        let extension = self.source_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(WatchError::config("source extension must not be empty"));
        }

        Ok(FileFilter {
            test_pattern,
            extension: extension.to_string(),
        })
    }
}

/// Compiled form of [`AnalyzerConfig`] used during traversal.
#[derive(Debug, Clone)]
pub struct FileFilter {
    test_pattern: Pattern,
    extension: String,
}

impl FileFilter {
    /// True if the file name matches the test-file glob.
    pub fn is_test_file(&self, file_name: &str) -> bool {
        self.test_pattern.matches(file_name)
    }

    /// True if the extension marks a source file.
    pub fn is_source_extension(&self, extension: &str) -> bool {
        extension == self.extension
    }
}
