//! Result assembly and JSON output.

use serde::Serialize;
use std::io::Write;

use crate::exports::first_exported_function;
use crate::parse::SyntaxTree;
use crate::watch::WatchList;

/// What a build needs to know about one entry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Package declared by the entry file
    pub package_name: String,
    /// First exported function of the entry file
    pub function_name: String,
    /// Entry path first, then related files in traversal order
    pub watch: WatchList,
}

impl AnalysisResult {
    /// Compact JSON, without a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Writes the compact JSON form to `out`.
    pub fn write_json<W: Write>(&self, out: &mut W) -> serde_json::Result<()> {
        serde_json::to_writer(out, self)
    }
}

/// Builds the result from the entry tree and the accumulated watch list.
///
/// Returns `None` when the entry declares no exported function.
pub fn assemble(entry: &SyntaxTree, watch: WatchList) -> Option<AnalysisResult> {
    let func = first_exported_function(entry)?;
    Some(AnalysisResult {
        package_name: entry.package_name.clone(),
        function_name: func.name.clone(),
        watch,
    })
}
