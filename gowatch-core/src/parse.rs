//! Go source parsing via tree-sitter.
//!
//! The concrete syntax tree is lowered straight into a declaration-level
//! [`SyntaxTree`]: the package name plus every top-level declaration in
//! source order. The parse fails on any tree-sitter error node and on a
//! set of rules the Go grammar is more lenient about than `go/parser`: a
//! missing or misplaced `package` clause, imports after other declarations,
//! statements outside a function body, invalid escapes in string and rune
//! literals, and an `else` on the line after its `}`. There is no degraded
//! tree.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::error::{IoResultExt, WatchError, WatchResult};
use crate::exports::is_exported;

/// A source file read from disk once.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    /// Reads the file at `path` as UTF-8 text.
    pub fn read(path: impl Into<PathBuf>) -> WatchResult<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path).with_path(&path)?;
        Ok(Self { path, text })
    }

    /// Builds a source file from text already in memory.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Kind of a top-level Go declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `func Name(...)`
    Function,
    /// `func (r T) Name(...)`
    Method,
    /// `type Name ...`
    Type,
    /// `var Name ...`
    Var,
    /// `const Name ...`
    Const,
}

impl DeclKind {
    /// Functions and methods are both function declarations in Go.
    pub fn is_function(self) -> bool {
        matches!(self, Self::Function | Self::Method)
    }
}

/// A named top-level entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    /// Line number (1-indexed) of the name
    pub line: usize,
}

impl Declaration {
    /// Visibility follows from the spelling of the name alone.
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// Declaration-level view of one parsed Go file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub path: PathBuf,
    /// Identifier from the `package` clause
    pub package_name: String,
    /// Top-level declarations in source order
    pub declarations: Vec<Declaration>,
}

/// Kinds holding the names of type/var/const declarations.
const SPEC_KINDS: &[&str] = &["type_spec", "type_alias", "var_spec", "const_spec"];

fn go_parser(path: &Path) -> WatchResult<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| WatchError::parse(path, format!("failed to load Go grammar: {}", e)))?;
    Ok(parser)
}

/// Reads and parses the file at `path`.
pub fn parse_file(path: &Path) -> WatchResult<SyntaxTree> {
    let source = SourceFile::read(path)?;
    parse_source(&source)
}

/// Parses an in-memory source file.
pub fn parse_source(source: &SourceFile) -> WatchResult<SyntaxTree> {
    let path = source.path.as_path();
    let bytes = source.text.as_bytes();

    let mut parser = go_parser(path)?;
    let tree = parser
        .parse(bytes, None)
        .ok_or_else(|| WatchError::parse(path, "parser produced no tree"))?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(syntax_error(path, root, bytes));
    }
    check_lexical_rules(path, root, bytes)?;

    let mut package_name = None;
    let mut declarations = Vec::new();
    let mut cursor = root.walk();

    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "package_clause" => {
                if package_name.is_some() || !declarations.is_empty() {
                    return Err(error_at(path, node, "unexpected 'package' clause"));
                }
                package_name = Some(package_identifier(path, node, bytes)?);
            }
            "comment" => {}
            "import_declaration" => {
                if package_name.is_none() {
                    return Err(error_at(path, node, "expected 'package' clause"));
                }
                if !declarations.is_empty() {
                    return Err(error_at(
                        path,
                        node,
                        "imports must appear before other declarations",
                    ));
                }
            }
            _ => {
                if package_name.is_none() {
                    return Err(error_at(path, node, "expected 'package' clause"));
                }
                lower_declaration(path, node, bytes, &mut declarations)?;
            }
        }
    }

    let package_name =
        package_name.ok_or_else(|| WatchError::parse(path, "expected 'package' clause"))?;

    debug!(
        file = %path.display(),
        package = %package_name,
        declarations = declarations.len(),
        "parsed"
    );

    Ok(SyntaxTree {
        path: path.to_path_buf(),
        package_name,
        declarations,
    })
}

fn package_identifier(path: &Path, clause: Node, bytes: &[u8]) -> WatchResult<String> {
    let mut cursor = clause.walk();
    let ident = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")
        .ok_or_else(|| error_at(path, clause, "package clause without a name"))?;
    node_text(path, ident, bytes)
}

/// Appends the declarations introduced by one top-level node.
fn lower_declaration(
    path: &Path,
    node: Node,
    bytes: &[u8],
    out: &mut Vec<Declaration>,
) -> WatchResult<()> {
    let kind = match node.kind() {
        "function_declaration" => DeclKind::Function,
        "method_declaration" => DeclKind::Method,
        "type_declaration" => DeclKind::Type,
        "var_declaration" => DeclKind::Var,
        "const_declaration" => DeclKind::Const,
        _ => {
            return Err(error_at(
                path,
                node,
                "non-declaration statement outside function body",
            ))
        }
    };

    if kind.is_function() {
        let name = node
            .child_by_field_name("name")
            .ok_or_else(|| error_at(path, node, "function declaration without a name"))?;
        out.push(Declaration {
            name: node_text(path, name, bytes)?,
            kind,
            line: name.start_position().row + 1,
        });
        return Ok(());
    }

    let mut specs = Vec::new();
    collect_specs(node, &mut specs);
    for spec in specs {
        let mut cursor = spec.walk();
        // The name field also covers the commas of `a, b = ...`.
        for name in spec
            .children_by_field_name("name", &mut cursor)
            .filter(|n| n.is_named())
        {
            out.push(Declaration {
                name: node_text(path, name, bytes)?,
                kind,
                line: name.start_position().row + 1,
            });
        }
    }
    Ok(())
}

/// Finds spec nodes under a grouped or single type/var/const declaration.
fn collect_specs<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if SPEC_KINDS.contains(&child.kind()) {
            out.push(child);
        } else if child.kind().ends_with("_spec_list") {
            collect_specs(child, out);
        }
    }
}

fn node_text(path: &Path, node: Node, bytes: &[u8]) -> WatchResult<String> {
    node.utf8_text(bytes)
        .map(str::to_string)
        .map_err(|e| error_at(path, node, format!("invalid UTF-8: {}", e)))
}

fn error_at(path: &Path, node: Node, message: impl Into<String>) -> WatchError {
    let pos = node.start_position();
    WatchError::parse_at(path, message, pos.row + 1, pos.column + 1)
}

/// Walks the whole tree for rules the grammar does not enforce.
///
/// Reports the first violation in source order.
fn check_lexical_rules(path: &Path, root: Node, bytes: &[u8]) -> WatchResult<()> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "interpreted_string_literal" | "rune_literal" => {
                let text = node_text(path, node, bytes)?;
                let checked = if node.kind() == "rune_literal" {
                    check_rune_literal(&text)
                } else {
                    check_string_literal(&text)
                };
                checked.map_err(|message| error_at(path, node, message))?;
                continue;
            }
            "else" => {
                // A newline after `}` inserts a semicolon, ending the `if`.
                if let Some(prev) = node.prev_sibling() {
                    if node.start_position().row > prev.end_position().row {
                        return Err(error_at(path, node, "unexpected 'else' after newline"));
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    Ok(())
}

/// Validates one escape sequence after its backslash; returns the bytes used.
fn check_escape(rest: &str, quote: char) -> Result<usize, String> {
    let mut chars = rest.chars();
    let Some(c) = chars.next() else {
        return Err("escape sequence not terminated".to_string());
    };
    let hex = |len: usize| -> Result<u32, String> {
        let digits = rest.get(1..1 + len).unwrap_or_default();
        if digits.len() != len || !digits.chars().all(|d| d.is_ascii_hexdigit()) {
            return Err(format!("invalid escape sequence '\\{}'", c));
        }
        u32::from_str_radix(digits, 16).map_err(|e| e.to_string())
    };

    match c {
        'a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' => Ok(1),
        c if c == quote => Ok(1),
        'x' => hex(2).map(|_| 3),
        'u' | 'U' => {
            let len = if c == 'u' { 4 } else { 8 };
            let value = hex(len)?;
            if char::from_u32(value).is_none() {
                return Err("escape sequence is invalid Unicode code point".to_string());
            }
            Ok(1 + len)
        }
        '0'..='7' => {
            let digits = rest.get(..3).unwrap_or_default();
            if digits.len() != 3 || !digits.chars().all(|d| ('0'..='7').contains(&d)) {
                return Err("invalid octal escape sequence".to_string());
            }
            let value = u32::from_str_radix(digits, 8).map_err(|e| e.to_string())?;
            if value > 255 {
                return Err("octal escape value > 255".to_string());
            }
            Ok(3)
        }
        _ => Err(format!("unknown escape sequence '\\{}'", c)),
    }
}

/// Checks the escapes of a double-quoted literal, quotes included.
fn check_string_literal(text: &str) -> Result<(), String> {
    let body = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    let mut i = 0;
    while let Some(offset) = body[i..].find('\\') {
        let start = i + offset + 1;
        i = start + check_escape(&body[start..], '"')?;
    }
    Ok(())
}

/// Checks that a rune literal holds exactly one character or escape.
fn check_rune_literal(text: &str) -> Result<(), String> {
    let body = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);
    let used = match body.strip_prefix('\\') {
        Some(rest) => 1 + check_escape(rest, '\'')?,
        None => body.chars().next().map_or(0, char::len_utf8),
    };
    if used == 0 || used != body.len() {
        return Err("rune literal must hold exactly one character".to_string());
    }
    Ok(())
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn syntax_error(path: &Path, root: Node, bytes: &[u8]) -> WatchError {
    let Some(node) = first_error(root) else {
        return WatchError::parse(path, "syntax error");
    };

    let message = if node.is_missing() {
        format!("missing {}", node.kind())
    } else {
        let snippet: String = node
            .utf8_text(bytes)
            .unwrap_or_default()
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(32)
            .collect();
        format!("syntax error near `{}`", snippet)
    };
    error_at(path, node, message)
}
