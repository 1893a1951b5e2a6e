//! gowatch-core: watch-list discovery for Go entry files.
//!
//! Given one entry `.go` file, finds the other Go files under its directory
//! whose exported functions the entry mentions, so a build pipeline knows
//! which files should trigger a rebuild. The analysis is static and
//! best-effort: exported names are matched textually against the entry
//! source, without type checking or import resolution.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gowatch_core::prelude::*;
//!
//! match Analyzer::new("api/main.go").analyze()? {
//!     Some(result) => print!("{}", result.to_json()?),
//!     None => {} // entry exports no function
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`scan`]: Candidate file discovery
//! - [`parse`]: tree-sitter parsing into a declaration-level tree
//! - [`exports`]: Exported function extraction
//! - [`usage`]: Textual usage matching and watch-list accumulation
//! - [`result`]: Result assembly and JSON output
//! - [`builder`]: Fluent builder running the pipeline
//! - [`error`]: Typed error handling

pub mod builder;
pub mod config;
pub mod error;
pub mod exports;
pub mod logging;
pub mod parse;
pub mod prelude;
pub mod result;
pub mod scan;
pub mod usage;
pub mod watch;

// Error types
pub use error::{IoResultExt, Stage, WatchError, WatchResult};

// Builder API
pub use builder::Analyzer;

// Configuration
pub use config::{AnalyzerConfig, FileFilter, DEFAULT_SOURCE_EXTENSION, DEFAULT_TEST_PATTERN};

// Logging
pub use logging::init_structured_logging;

// Parsing
pub use parse::{parse_file, parse_source, DeclKind, Declaration, SourceFile, SyntaxTree};

// Extraction and matching
pub use exports::{exported_functions, first_exported_function, is_exported};
pub use usage::{collect_related, is_used};

// Scanning
pub use scan::{entry_dir, gather_source_files, relative_path};

// Output
pub use result::{assemble, AnalysisResult};
pub use watch::WatchList;
