//! Error types for query splitting.

use thiserror::Error;

/// Lexer error with position information.
///
/// Never surfaces through [`split_quoted`](crate::split_quoted): malformed
/// quoting degrades to plain unquoted text instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.format_with_context())]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where error occurred.
    pub position: usize,
    /// The original input string.
    pub input: String,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    /// Formats the error with a position indicator showing where the error occurred.
    pub fn format_with_context(&self) -> String {
        let mut result = String::new();
        result.push_str(&format!("query syntax error: {}\n", self.message));
        result.push_str(&format!("  {}\n", self.input));
        result.push_str(&format!("  {}^", " ".repeat(self.position)));
        result
    }
}
