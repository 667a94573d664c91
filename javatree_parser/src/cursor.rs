//! Token cursor with look-ahead and speculative markers
//!
//! The parser never touches the lexer directly: it walks a materialized
//! token buffer through this cursor. Comments stay in the buffer (the
//! previous token may be a Javadoc comment) but are invisible to forward
//! look-ahead and to [`TokenCursor::advance`].
//!
//! Speculative parsing uses a LIFO stack of saved positions: push a
//! marker, try an alternative, and either discard the marker (commit) or
//! reset to it (roll back). Markers nest, so speculation sites can occur
//! inside other speculation sites.

use crate::lexer::SpannedToken;
use crate::token::Token;

/// Look-ahead buffer over the token stream
#[derive(Debug)]
pub struct TokenCursor<'a> {
    /// All tokens, comments included, ending with `EndMarker`
    tokens: Vec<SpannedToken<'a>>,
    /// Index of the current token; never points at a comment
    pos: usize,
    /// Saved positions for speculative parsing
    markers: Vec<usize>,
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor over a token stream produced by
    /// [`crate::lexer::tokenize`]. The stream must end with `EndMarker`.
    pub fn new(tokens: Vec<SpannedToken<'a>>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| t.token),
            Some(Token::EndMarker)
        ));
        let mut cursor = Self {
            tokens,
            pos: 0,
            markers: Vec::new(),
        };
        cursor.skip_comments();
        cursor
    }

    fn skip_comments(&mut self) {
        while self.tokens[self.pos].token == Token::Comment {
            self.pos += 1;
        }
    }

    /// The current token. Always valid: the end marker is never consumed.
    pub fn current(&self) -> &SpannedToken<'a> {
        &self.tokens[self.pos]
    }

    /// Peek `k` non-comment tokens ahead; `look(0)` is the current token.
    /// Clamps to the end marker.
    pub fn look(&self, k: usize) -> &SpannedToken<'a> {
        let mut idx = self.pos;
        let mut remaining = k;
        while remaining > 0 && self.tokens[idx].token != Token::EndMarker {
            idx += 1;
            while self.tokens[idx].token == Token::Comment {
                idx += 1;
            }
            remaining -= 1;
        }
        &self.tokens[idx]
    }

    /// The most recently passed token, comments included.
    ///
    /// This is how Javadoc reaches declarations: after `advance` skips a
    /// comment, the comment sits immediately behind the cursor.
    pub fn previous(&self) -> Option<&SpannedToken<'a>> {
        self.pos.checked_sub(1).map(|i| &self.tokens[i])
    }

    /// Consume the current token. Does nothing at the end marker.
    pub fn advance(&mut self) {
        if self.tokens[self.pos].token != Token::EndMarker {
            self.pos += 1;
            self.skip_comments();
        }
    }

    /// Whether the cursor has reached the end marker
    pub fn is_at_end(&self) -> bool {
        self.tokens[self.pos].token == Token::EndMarker
    }

    /// Record the current position for a speculative parse
    pub fn push_marker(&mut self) {
        self.markers.push(self.pos);
    }

    /// Finish a speculative parse. With `reset` the cursor returns to the
    /// position saved by the matching [`Self::push_marker`]; without it
    /// the marker is simply discarded and parsing continues from here.
    pub fn pop_marker(&mut self, reset: bool) {
        let saved = self
            .markers
            .pop()
            .expect("pop_marker without matching push_marker");
        if reset {
            self.pos = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn cursor(source: &str) -> TokenCursor<'_> {
        TokenCursor::new(tokenize(source, "<test>").expect("tokenize failed"))
    }

    #[test]
    fn test_look_skips_comments() {
        let cur = cursor("a /* note */ b");
        assert_eq!(cur.look(0).text, "a");
        assert_eq!(cur.look(1).text, "b");
        assert_eq!(cur.look(2).token, Token::EndMarker);
    }

    #[test]
    fn test_advance_leaves_comment_behind() {
        let mut cur = cursor("/** doc */ class A");
        assert_eq!(cur.current().text, "class");
        assert_eq!(cur.previous().unwrap().text, "/** doc */");
        cur.advance();
        assert_eq!(cur.current().text, "A");
        assert_eq!(cur.previous().unwrap().text, "class");
    }

    #[test]
    fn test_markers_nest() {
        let mut cur = cursor("a b c d");
        cur.push_marker();
        cur.advance();
        cur.push_marker();
        cur.advance();
        assert_eq!(cur.current().text, "c");
        cur.pop_marker(true);
        assert_eq!(cur.current().text, "b");
        cur.pop_marker(true);
        assert_eq!(cur.current().text, "a");
    }

    #[test]
    fn test_marker_commit() {
        let mut cur = cursor("a b");
        cur.push_marker();
        cur.advance();
        cur.pop_marker(false);
        assert_eq!(cur.current().text, "b");
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut cur = cursor("a");
        cur.advance();
        assert!(cur.is_at_end());
        cur.advance();
        assert!(cur.is_at_end());
    }
}
