//! Utility functions for internal use.

const DEFAULT_INDENT_ATOM: &'static str = "  ";

/// Indents a piece of text.
pub fn indent(text: &str, level: usize) -> String {
    indent_ext(text, level, DEFAULT_INDENT_ATOM)
}

pub fn indent_ext(text: &str, level: usize, indentation_atom: &str) -> String {
    let indent = (0..level).into_iter().map(|_| indentation_atom).collect::<Vec<_>>().join("");
    text.lines().map(|l| format!("{}{}", indent, l)).collect::<Vec<_>>().join("\n")
}
