//! Builder API that runs the whole analysis.
//!
//! ```rust,ignore
//! use gowatch_core::prelude::*;
//!
//! if let Some(result) = Analyzer::new("api/main.go").analyze()? {
//!     println!("{}", result.to_json()?);
//! }
//! ```
//!
//! Stages run strictly in order: read entry, collect candidates, parse and
//! match each candidate, parse entry, pick the first exported function.
//! The first error ends the run; nothing partial is returned.

use std::path::{Path, PathBuf};
use tracing::{info, info_span};

use crate::config::AnalyzerConfig;
use crate::error::WatchResult;
use crate::parse::{parse_source, SourceFile};
use crate::result::{assemble, AnalysisResult};
use crate::scan::{entry_dir, gather_source_files, relative_path};
use crate::usage::collect_related;
use crate::watch::WatchList;

/// Builder for configuring watch-list analysis of one entry file.
#[derive(Debug, Clone)]
pub struct Analyzer {
    /// Entry Go file
    entry: PathBuf,

    /// Candidate filtering settings
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create a new analysis builder for the given entry file.
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self::with_config(entry, AnalyzerConfig::default())
    }

    /// Create a builder with an explicit configuration.
    pub fn with_config(entry: impl Into<PathBuf>, config: AnalyzerConfig) -> Self {
        Self {
            entry: entry.into(),
            config,
        }
    }

    /// Override the test-file glob.
    pub fn test_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.test_pattern = pattern.into();
        self
    }

    /// Override the source file extension.
    pub fn source_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.source_extension = extension.into();
        self
    }

    pub fn entry(&self) -> &Path {
        &self.entry
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run the analysis.
    ///
    /// `Ok(None)` means the entry declares no exported function; that is
    /// not an error.
    pub fn analyze(&self) -> WatchResult<Option<AnalysisResult>> {
        let span = info_span!("analyze", entry = %self.entry.display());
        let _guard = span.enter();

        let filter = self.config.compile()?;

        // 1. Read entry once; its raw text is what usages are matched against
        let entry = SourceFile::read(&self.entry)?;
        let root = entry_dir(&self.entry);
        let entry_in_root = match self.entry.file_name() {
            Some(name) => root.join(name),
            None => self.entry.clone(),
        };
        let watch = WatchList::new(relative_path(&root, &entry_in_root));

        // 2. Collect candidates
        let candidates = gather_source_files(&root, &filter)?;
        info!(root = %root.display(), candidates = candidates.len(), "collected");

        // 3. Parse candidates and match their exports
        let watch = collect_related(&root, &entry_in_root, &entry.text, &candidates, watch)?;
        info!(watch = watch.len(), "matched");

        // 4. Parse entry and assemble
        let entry_tree = parse_source(&entry)?;
        let result = assemble(&entry_tree, watch);
        match &result {
            Some(r) => info!(package = %r.package_name, function = %r.function_name, "assembled"),
            None => info!("entry declares no exported function"),
        }

        Ok(result)
    }
}
