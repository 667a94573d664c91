//! javatree_parser
//!
//! Hand-written recursive descent parser for the Java programming
//! language (Java 8 through roughly Java 14: modules, `var`, lambdas,
//! method references, switch expressions, try-with-resources, annotations
//! everywhere). Produces a fully typed AST for a compilation unit.
//!
//! The parser does no name resolution, no type checking and no error
//! recovery: the first grammar violation is reported as a
//! [`SyntaxError`] and parsing halts.
//!
//! # Example
//!
//! ```
//! use javatree_parser::{parse_str, ast::CompilationUnit};
//!
//! let unit = parse_str("package a.b; class C {}", "C.java").expect("parse failed");
//! assert!(matches!(unit, CompilationUnit::Ordinary(_)));
//! ```

pub mod ast;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

use std::io::Read;

// Re-exports
pub use ast::CompilationUnit;
pub use cursor::TokenCursor;
pub use error::{Error, ParseResult, SyntaxError};
pub use lexer::{tokenize, SpannedToken};
pub use parser::Parser;
pub use span::{SourceMap, Span};
pub use token::Token;

/// Parse Java source code into a compilation unit.
///
/// # Example
///
/// ```
/// use javatree_parser::parse_str;
///
/// let unit = parse_str("class C {}", "C.java").unwrap();
/// assert!(unit.to_json().is_object());
/// ```
pub fn parse_str(source: &str, filename: &str) -> ParseResult<CompilationUnit> {
    Parser::new(source, filename)?.parse_compilation_unit()
}

/// Parse Java source bytes into a compilation unit.
///
/// The bytes must be UTF-8; anything else is reported as a
/// [`SyntaxError`] at the first undecodable byte.
pub fn parse_source(bytes: &[u8], filename: &str) -> ParseResult<CompilationUnit> {
    match std::str::from_utf8(bytes) {
        Ok(source) => parse_str(source, filename),
        Err(err) => {
            let prefix = &bytes[..err.valid_up_to()];
            let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
            let line_start = prefix
                .iter()
                .rposition(|&b| b == b'\n')
                .map(|i| i + 1)
                .unwrap_or(0);
            let col = err.valid_up_to() - line_start + 1;
            Err(SyntaxError::new(
                "source is not valid UTF-8",
                filename,
                line,
                col,
                String::from_utf8_lossy(&prefix[line_start..]).into_owned(),
            ))
        }
    }
}

/// Parse Java source from a reader into a compilation unit
pub fn parse_reader<R: Read>(mut reader: R, filename: &str) -> Result<CompilationUnit, Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|source| Error::Io {
        filename: filename.to_string(),
        source,
    })?;
    Ok(parse_source(&bytes, filename)?)
}

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str() {
        let unit = parse_str("class C {}", "C.java").unwrap();
        assert!(matches!(unit, CompilationUnit::Ordinary(_)));
    }

    #[test]
    fn test_parse_source_rejects_bad_utf8() {
        let err = parse_source(b"class C {\xff}", "C.java").unwrap_err();
        assert!(err.message.contains("UTF-8"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_parse_reader() {
        let unit = parse_reader("class C {}".as_bytes(), "C.java").unwrap();
        assert!(matches!(unit, CompilationUnit::Ordinary(_)));
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("1 + 2", "<test>").unwrap();
        assert_eq!(tokens.len(), 4); // includes the end marker
    }

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
