//! Textual usage matching against the entry file.
//!
//! A name counts as used when its spelling appears anywhere in the entry
//! text: in code, comments, string literals, or inside a longer identifier.
//! This over-approximates on purpose and never misses a genuine usage.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::WatchResult;
use crate::exports::exported_functions;
use crate::parse::parse_file;
use crate::scan::relative_path;
use crate::watch::WatchList;

/// True if `name` occurs as a substring of `entry_text`.
#[inline]
pub fn is_used(name: &str, entry_text: &str) -> bool {
    entry_text.contains(name)
}

/// Matches every candidate's exported functions against the entry text.
///
/// Any candidate with the same file name as `entry_path` is skipped, at
/// every depth: a nested `users/index.go` is not matched against an entry
/// `index.go`. Each remaining candidate is parsed; a parse failure aborts
/// the whole run. For every exported function whose name is used, the candidate's path
/// relative to `root` is appended to `watch`, once per matching function.
pub fn collect_related(
    root: &Path,
    entry_path: &Path,
    entry_text: &str,
    candidates: &[PathBuf],
    mut watch: WatchList,
) -> WatchResult<WatchList> {
    let entry_name = entry_path.file_name();

    for candidate in candidates {
        if candidate.file_name() == entry_name {
            debug!(file = %candidate.display(), "skipped, shares entry name");
            continue;
        }

        let tree = parse_file(candidate)?;
        for decl in exported_functions(&tree) {
            if is_used(&decl.name, entry_text) {
                let rel = relative_path(root, candidate);
                debug!(file = %rel, symbol = %decl.name, "related");
                watch.push(rel);
            }
        }
    }

    Ok(watch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchError;
    use std::fs;

    #[test]
    fn test_is_used_is_textual() {
        let entry = r#"package app

// Subtract is mentioned only here.
func main() { fmt.Println(Add(1, 2), "Mul", AddAll) }
"#;
        assert!(is_used("Add", entry));
        assert!(is_used("Subtract", entry));
        assert!(is_used("Mul", entry));
        assert!(is_used("All", entry));
        assert!(!is_used("Div", entry));
        assert!(!is_used("add", entry));
    }

    fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, Vec<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = Vec::new();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            paths.push(path);
        }
        (dir, paths)
    }

    #[test]
    fn test_collect_related_per_declaration() {
        let (dir, paths) = project(&[
            ("main.go", "package app\n"),
            (
                "math.go",
                "package app\n\nfunc Add(a, b int) int { return a + b }\nfunc Mul(a, b int) int { return a * b }\nfunc sub() {}\n",
            ),
            ("str.go", "package app\n\nfunc Upper(s string) string { return s }\n"),
        ]);
        let entry_text = "package app\n\nfunc main() { println(Add(1, Mul(2, 3))); sub() }\n";

        let watch = collect_related(
            dir.path(),
            &paths[0],
            entry_text,
            &paths,
            WatchList::new("main.go"),
        )
        .unwrap();

        assert_eq!(watch.as_slice(), ["main.go", "math.go", "math.go"]);
    }

    #[test]
    fn test_entry_is_never_matched_against_itself() {
        let (dir, paths) = project(&[("main.go", "package app\n\nfunc Run() {}\n")]);
        let watch = collect_related(
            dir.path(),
            &paths[0],
            "package app\n\nfunc Run() {}\n",
            &paths,
            WatchList::new("main.go"),
        )
        .unwrap();
        assert_eq!(watch.as_slice(), ["main.go"]);
    }

    #[test]
    fn test_nested_file_with_entry_name_is_skipped() {
        let (dir, paths) = project(&[
            ("index.go", "package api\n\nfunc Handler() {}\n"),
            ("users/index.go", "package users\n\nfunc Handler() {}\n"),
            ("users/list.go", "package users\n\nfunc Handler2() {}\n"),
        ]);
        let watch = collect_related(
            dir.path(),
            &paths[0],
            "package api\n\nfunc Handler() {}\n",
            &paths,
            WatchList::new("index.go"),
        )
        .unwrap();
        assert_eq!(watch.as_slice(), ["index.go"]);
    }

    #[test]
    fn test_broken_candidate_aborts() {
        let (dir, paths) = project(&[
            ("a.go", "package app\n\nfunc A() {}\n"),
            ("broken.go", "package app\n\nfunc (\n"),
            ("main.go", "package app\n"),
        ]);
        let err = collect_related(
            dir.path(),
            &paths[2],
            "A()",
            &paths,
            WatchList::new("main.go"),
        )
        .unwrap_err();
        assert!(matches!(err, WatchError::Parse { .. }));
        assert!(err.path().unwrap().ends_with("broken.go"));
    }
}
