//! Syntax error type
//!
//! The parser reports exactly one kind of error: the first grammar
//! violation it encounters, with the position of the offending token.

use std::io;

use thiserror::Error;

/// Error raised when the token stream violates the Java grammar.
///
/// There is a single error kind; the `message` carries the taxonomy
/// ("expected … got …", "illegal start of expression", contextual errors
/// such as "'else' without 'if'").
#[derive(Error, Debug, Clone)]
#[error("{message} at {filename}:{line}:{col}")]
pub struct SyntaxError {
    /// Human-readable description, including the got-token for
    /// expectation failures.
    pub message: String,
    /// Name of the file being parsed.
    pub filename: String,
    /// Line of the offending token (1-indexed).
    pub line: usize,
    /// Column of the offending token (1-indexed, in bytes).
    pub col: usize,
    /// Full text of the offending line, without its newline.
    pub line_text: String,
    /// Exact source text of the offending token, if there is one.
    pub got_token: Option<String>,
    /// Earlier error from a failed speculative parse, when both
    /// alternatives of an ambiguity failed.
    #[source]
    pub cause: Option<Box<SyntaxError>>,
}

impl SyntaxError {
    /// Create a syntax error with an explicit message
    pub fn new(
        message: impl Into<String>,
        filename: impl Into<String>,
        line: usize,
        col: usize,
        line_text: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            filename: filename.into(),
            line,
            col,
            line_text: line_text.into(),
            got_token: None,
            cause: None,
        }
    }

    /// Attach the source text of the offending token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.got_token = Some(token.into());
        self
    }

    /// Attach the error from a failed speculative alternative
    pub fn with_cause(mut self, cause: SyntaxError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Format the error with the offending source line and a marker.
    ///
    /// ```text
    ///   3 |     int x = ;
    ///     |             ^
    /// ```
    pub fn format_with_context(&self) -> String {
        if self.line_text.is_empty() {
            return String::new();
        }
        let gutter = self.line.to_string();
        let spaces = " ".repeat(self.col.saturating_sub(1));
        let width = self
            .got_token
            .as_ref()
            .map(|t| t.len().max(1))
            .unwrap_or(1)
            .min(self.line_text.len().saturating_sub(self.col.saturating_sub(1)).max(1));
        format!(
            "  {} | {}\n  {} | {}{}",
            gutter,
            self.line_text,
            " ".repeat(gutter.len()),
            spaces,
            "^".repeat(width)
        )
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Top-level error for the reader-based entry points.
///
/// The parser core only ever produces [`SyntaxError`]; this wrapper adds
/// the I/O failures that reading a source file can hit.
#[derive(Error, Debug)]
pub enum Error {
    /// The source violated the Java grammar
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The source could not be read
    #[error("failed to read {filename}")]
    Io {
        filename: String,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SyntaxError::new("expected ';' got '}'", "A.java", 3, 14, "    int x = 1 }")
            .with_token("}");
        assert_eq!(err.to_string(), "expected ';' got '}' at A.java:3:14");
    }

    #[test]
    fn test_format_with_context() {
        let err = SyntaxError::new("expected ';' got '}'", "A.java", 1, 11, "int x = 1 }")
            .with_token("}");
        let context = err.format_with_context();
        assert!(context.contains("int x = 1 }"));
        assert!(context.contains('^'));
    }

    #[test]
    fn test_cause_chain() {
        let inner = SyntaxError::new("expected NAME got '='", "A.java", 1, 5, "a = b;");
        let outer = SyntaxError::new("expected ';' got '='", "A.java", 1, 5, "a = b;")
            .with_cause(inner);
        assert!(outer.cause.is_some());
        assert!(std::error::Error::source(&outer).is_some());
    }
}
