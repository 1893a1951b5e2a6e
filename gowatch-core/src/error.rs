//! Typed error handling for gowatch.
//!
//! Every failure is fatal: there is no recoverable category and no retry.
//! Errors still carry which pipeline stage failed and on which path, so
//! callers and tests can tell a broken sibling from an unreadable entry.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Validating the analyzer configuration
    Configure,
    /// Reading a source file from disk
    Read,
    /// Walking the entry directory
    Collect,
    /// Parsing a source file into a syntax tree
    Parse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configure => "configure",
            Self::Read => "read",
            Self::Collect => "collect",
            Self::Parse => "parse",
        };
        f.write_str(name)
    }
}

/// Main error type for gowatch operations.
#[derive(Error, Debug)]
pub enum WatchError {
    /// I/O error when reading a source file
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Directory traversal failed
    #[error("Traversal error under {root}: {message}")]
    Traverse {
        root: PathBuf,
        message: String,
        #[source]
        source: Option<walkdir::Error>,
    },

    /// Malformed Go source
    #[error("Could not parse Go file \"{}\"{}: {message}", path.display(), location(*line, *column))]
    Parse {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
        /// Column number (1-indexed) if available
        column: Option<usize>,
    },

    /// Invalid analyzer configuration
    #[error("Config error: {message}")]
    Config { message: String },
}

fn location(line: Option<usize>, column: Option<usize>) -> String {
    match (line, column) {
        (Some(l), Some(c)) => format!(" at {}:{}", l, c),
        (Some(l), None) => format!(" at line {}", l),
        _ => String::new(),
    }
}

impl WatchError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a traversal error from a walkdir failure.
    pub fn traverse(root: impl Into<PathBuf>, err: walkdir::Error) -> Self {
        Self::Traverse {
            root: root.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a parse error without location.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// Create a parse error with line/column info.
    pub fn parse_at(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The pipeline stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Io { .. } => Stage::Read,
            Self::Traverse { .. } => Stage::Collect,
            Self::Parse { .. } => Stage::Parse,
            Self::Config { .. } => Stage::Configure,
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Traverse { root, .. } => Some(root),
            Self::Parse { path, .. } => Some(path),
            Self::Config { .. } => None,
        }
    }
}

/// Convenience type alias for gowatch results.
pub type WatchResult<T> = Result<T, WatchError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> WatchResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> WatchResult<T> {
        self.map_err(|e| WatchError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = WatchError::io(
            PathBuf::from("/app/main.go"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, WatchError::Io { .. }));
        assert_eq!(err.stage(), Stage::Read);
        assert_eq!(err.path(), Some(&PathBuf::from("/app/main.go")));
        assert!(err.to_string().contains("/app/main.go"));
    }

    #[test]
    fn test_parse_error_with_location() {
        let err = WatchError::parse_at("math.go", "unexpected token", 10, 5);
        if let WatchError::Parse { line, column, .. } = &err {
            assert_eq!(*line, Some(10));
            assert_eq!(*column, Some(5));
        } else {
            panic!("Expected Parse error");
        }
        assert_eq!(err.stage(), Stage::Parse);
        assert_eq!(
            err.to_string(),
            "Could not parse Go file \"math.go\" at 10:5: unexpected token"
        );
    }

    #[test]
    fn test_parse_error_without_location() {
        let err = WatchError::parse("lib.go", "missing package clause");
        assert_eq!(
            err.to_string(),
            "Could not parse Go file \"lib.go\": missing package clause"
        );
    }

    #[test]
    fn test_config_error_has_no_path() {
        let err = WatchError::config("bad pattern");
        assert_eq!(err.stage(), Stage::Configure);
        assert!(err.path().is_none());
        assert_eq!(Stage::Configure.to_string(), "configure");
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("/missing/file.go").unwrap_err();
        assert_eq!(err.stage(), Stage::Read);
    }
}
