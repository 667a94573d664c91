//! Lexer for Java source code
//!
//! Wraps the logos-generated lexer with block comment scanning and
//! friendly errors for unterminated literals. The parser consumes the
//! token stream through [`crate::cursor::TokenCursor`].

use logos::Logos;

use crate::error::{ParseResult, SyntaxError};
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// A token with its span and exact source text
#[derive(Debug, Clone, Copy)]
pub struct SpannedToken<'a> {
    pub token: Token,
    pub span: Span,
    pub text: &'a str,
}

impl<'a> SpannedToken<'a> {
    pub fn new(token: Token, span: Span, text: &'a str) -> Self {
        Self { token, span, text }
    }

    /// Human-readable description for error messages: the quoted source
    /// text, or "end of file" for the end marker.
    pub fn describe(&self) -> String {
        match self.token {
            Token::EndMarker => "end of file".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Tokenize Java source code.
///
/// Returns the full token stream with whitespace discarded, comments
/// kept, and a final [`Token::EndMarker`]. The first lexical problem
/// (unknown character, unterminated comment or literal) aborts with a
/// [`SyntaxError`].
pub fn tokenize<'a>(source: &'a str, filename: &str) -> ParseResult<Vec<SpannedToken<'a>>> {
    let source_map = SourceMap::new(source);
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        match result {
            Ok(Token::BlockCommentStart) => {
                // Scan to the matching `*/`; Java block comments do not nest.
                let rest = &source.as_bytes()[range.end..];
                match memchr::memmem::find(rest, b"*/") {
                    Some(pos) => {
                        lexer.bump(pos + 2);
                        let end = range.end + pos + 2;
                        let span = source_map.span(range.start, end);
                        tokens.push(SpannedToken::new(
                            Token::Comment,
                            span,
                            &source[range.start..end],
                        ));
                    }
                    None => {
                        return Err(lex_error(
                            "unterminated comment",
                            source,
                            &source_map,
                            filename,
                            range.start,
                        ));
                    }
                }
            }
            Ok(token) => {
                let text = &source[range.start..range.end];
                let token = if token == Token::Name && crate::token::is_reserved(text) {
                    Token::Keyword
                } else {
                    token
                };
                let span = source_map.span(range.start, range.end);
                tokens.push(SpannedToken::new(token, span, text));
            }
            Err(()) => {
                let message = match source[range.start..].chars().next() {
                    Some('"') => "unterminated string literal",
                    Some('\'') => "unterminated character literal",
                    _ => "unrecognized token",
                };
                return Err(lex_error(message, source, &source_map, filename, range.start));
            }
        }
    }

    let end = source.len();
    let span = source_map.span(end, end);
    tokens.push(SpannedToken::new(Token::EndMarker, span, ""));

    Ok(tokens)
}

fn lex_error(
    message: &str,
    source: &str,
    source_map: &SourceMap,
    filename: &str,
    offset: usize,
) -> SyntaxError {
    let (line, col) = source_map.line_col(offset);
    SyntaxError::new(message, filename, line, col, source_map.line_text(source, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source, "<test>")
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_ends_with_endmarker() {
        assert_eq!(kinds(""), vec![Token::EndMarker]);
        assert_eq!(kinds("x"), vec![Token::Name, Token::EndMarker]);
    }

    #[test]
    fn test_reserved_words_are_keywords() {
        assert_eq!(
            kinds("return x"),
            vec![Token::Keyword, Token::Name, Token::EndMarker]
        );
        // Contextual keywords stay plain names.
        assert_eq!(
            kinds("var module"),
            vec![Token::Name, Token::Name, Token::EndMarker]
        );
    }

    #[test]
    fn test_block_comment_is_one_token() {
        let tokens = tokenize("/** doc */ class", "<test>").unwrap();
        assert_eq!(tokens[0].token, Token::Comment);
        assert_eq!(tokens[0].text, "/** doc */");
        assert_eq!(tokens[1].token, Token::Name);
        assert_eq!(tokens[1].text, "class");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize("int x; /* oops", "<test>").unwrap_err();
        assert!(err.message.contains("unterminated comment"));
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 8);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("String s = \"abc", "<test>").unwrap_err();
        assert!(err.message.contains("unterminated string"));
    }

    #[test]
    fn test_spans_abut_for_split_shift() {
        let tokens = tokenize("x >> 2", "<test>").unwrap();
        assert_eq!(tokens[1].token, Token::Gt);
        assert_eq!(tokens[2].token, Token::Gt);
        assert!(tokens[1].span.abuts(&tokens[2].span));
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("int x = #;", "<test>").unwrap_err();
        assert!(err.message.contains("unrecognized token"));
        assert_eq!(err.col, 9);
    }
}
