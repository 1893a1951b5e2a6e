//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use gowatch_core::prelude::*;
//! ```

pub use crate::builder::Analyzer;
pub use crate::config::AnalyzerConfig;
pub use crate::error::{Stage, WatchError, WatchResult};
pub use crate::result::AnalysisResult;
pub use crate::watch::WatchList;
