//! Exported function extraction.
//!
//! Go has no visibility keyword: an identifier is exported when its first
//! character is an upper-case letter. Only function declarations (including
//! methods) count as exports here; types, vars and consts are ignored.

use crate::parse::{Declaration, SyntaxTree};

/// True if `name` is exported under Go's capitalization rule.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Exported function declarations of `tree`, in source order.
pub fn exported_functions(tree: &SyntaxTree) -> impl Iterator<Item = &Declaration> {
    tree.declarations
        .iter()
        .filter(|d| d.kind.is_function() && d.is_exported())
}

/// First exported function declaration of `tree`, if any.
pub fn first_exported_function(tree: &SyntaxTree) -> Option<&Declaration> {
    exported_functions(tree).next()
}
