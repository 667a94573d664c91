//! Span information for source locations
//!
//! Tracks where each token came from so syntax errors can point at the
//! offending line and column.

use serde::Serialize;

/// Represents a span in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    /// Byte offset start (0-indexed)
    pub start: usize,
    /// Byte offset end (exclusive)
    pub end: usize,
    /// Line number (1-indexed)
    pub start_line: usize,
    /// Line number (1-indexed)
    pub end_line: usize,
    /// Column (1-indexed, in bytes)
    pub start_column: usize,
    /// Column (1-indexed, in bytes)
    pub end_column: usize,
}

impl Span {
    /// Create a new span
    pub fn new(
        start: usize,
        end: usize,
        start_line: usize,
        end_line: usize,
        start_column: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            end_line,
            start_column,
            end_column,
        }
    }

    /// Create an empty span at position 0
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check whether another span starts exactly where this one ends.
    ///
    /// Used by the parser to fuse adjacent `>` tokens into `>>` and `>>>`
    /// without the lexer ever producing multi-character shift tokens.
    pub fn abuts(&self, other: &Span) -> bool {
        self.end == other.start
    }
}

/// Helper struct mapping byte offsets to lines and columns
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Line start offsets (byte positions where each line starts)
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Create a new source map from source code
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Get line and column for a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        // Binary search for the line
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = offset - line_start + 1; // 1-indexed
        (line + 1, column) // 1-indexed line
    }

    /// Create a span with line/column information
    pub fn span(&self, start: usize, end: usize) -> Span {
        let (start_line, start_column) = self.line_col(start);
        let (end_line, end_column) = self.line_col(end);
        Span {
            start,
            end,
            start_line,
            end_line,
            start_column,
            end_column,
        }
    }

    /// Get the full text of a line (1-indexed), without its newline.
    ///
    /// Syntax errors carry the offending line so the CLI can underline it.
    pub fn line_text<'s>(&self, source: &'s str, line: usize) -> &'s str {
        let Some(&start) = self.line_starts.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self.line_starts.get(line).copied().unwrap_or(source.len());
        source[start..end].trim_end_matches(['\n', '\r'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_map() {
        let source = "hello\nworld\n";
        let map = SourceMap::new(source);

        assert_eq!(map.line_col(0), (1, 1)); // 'h'
        assert_eq!(map.line_col(5), (1, 6)); // '\n'
        assert_eq!(map.line_col(6), (2, 1)); // 'w'
        assert_eq!(map.line_col(11), (2, 6)); // '\n'
    }

    #[test]
    fn test_line_text() {
        let source = "class A {\n    int x;\n}";
        let map = SourceMap::new(source);

        assert_eq!(map.line_text(source, 1), "class A {");
        assert_eq!(map.line_text(source, 2), "    int x;");
        assert_eq!(map.line_text(source, 3), "}");
        assert_eq!(map.line_text(source, 4), "");
    }

    #[test]
    fn test_abuts() {
        let map = SourceMap::new("x >> 2");
        let first = map.span(2, 3);
        let second = map.span(3, 4);
        assert!(first.abuts(&second));
        assert!(!second.abuts(&first));
    }
}
