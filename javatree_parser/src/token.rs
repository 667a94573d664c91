//! Token definitions for the Java lexer
//!
//! Identifier-shaped words lex as [`Token::Name`]; the words reserved by
//! the Java language are re-tagged [`Token::Keyword`] by the lexer
//! wrapper. The parser matches keywords by their text, so contextual
//! keywords (`module`, `open`, `requires`, `to`, `var`, `yield`,
//! `sealed`, …) stay ordinary identifiers, while a reserved word never
//! satisfies a NAME check (`return x;` must not parse as a declaration of
//! a variable `x` of type `return`).
//!
//! `>` is always a single-character token. The shift operators `>>` and
//! `>>>` do not exist at the lexical level; the parser recognises them by
//! token adjacency so that nested generic type arguments (`Map<K,
//! List<V>>`) can still consume one `>` at a time. The compound
//! assignments `>>=` and `>>>=` are unambiguous and lex as single tokens.

use logos::Logos;

/// Java tokens
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0c]+")]
pub enum Token {
    // ==================== Words and Literals ====================
    /// Identifier, or any word not reserved by the language
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Name,

    /// A word reserved by the Java language (re-tagged from [`Token::Name`]
    /// by the lexer wrapper; logos itself never produces this)
    Keyword,

    /// Numeric literal, suffix included verbatim
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*[lL]?")]
    #[regex(r"0[bB][01][01_]*[lL]?")]
    #[regex(r"[0-9][0-9_]*[lL]")]
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    Number,

    /// String literal with original quoting and escapes
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    Str,

    /// Character literal with original quoting and escapes
    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    CharLit,

    /// Line or block comment. Kept in the token buffer so a preceding
    /// `/** … */` can be attached to the next declaration as Javadoc.
    #[regex(r"//[^\n]*")]
    Comment,

    /// Internal: opening of a block comment; the lexer wrapper scans to
    /// the matching `*/` and re-tags the whole thing as [`Token::Comment`]
    #[token("/*")]
    BlockCommentStart,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // ==================== Punctuation ====================
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("?")]
    Question,
    #[token("->")]
    Arrow,

    // ==================== Assignment Operators ====================
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token(">>>=")]
    UshrEq,

    // ==================== Operators ====================
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<<")]
    Shl,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("!")]
    Not,
    #[token("~")]
    Tilde,

    /// Synthetic token appended after the last real token, so the parser
    /// can always inspect "the current token"
    EndMarker,
}

/// The words reserved by the Java language, boolean and null literals
/// included. Contextual keywords (`var`, `module`, `sealed`, …) are
/// deliberately absent: they remain usable as identifiers.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "true",
    "false", "null", "try", "void", "volatile", "while",
];

/// Whether a word is reserved and can never be an identifier
pub fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

impl Token {
    /// Display name of the token kind, used in "expected …" messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Name => "NAME",
            Token::Keyword => "KEYWORD",
            Token::Number => "NUMBER",
            Token::Str => "STRING",
            Token::CharLit => "CHAR",
            Token::Comment | Token::BlockCommentStart => "COMMENT",
            Token::EndMarker => "end of file",
            _ => "OP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos as _;

    fn lex(source: &str) -> Vec<(Token, &str)> {
        Token::lexer(source)
            .spanned()
            .map(|(tok, span)| (tok.expect("lex error"), &source[span]))
            .collect()
    }

    #[test]
    fn test_words_lex_as_names() {
        // Reserved-word re-tagging happens in the lexer wrapper, not here.
        let tokens = lex("var module sealed to requires");
        assert!(tokens.iter().all(|(tok, _)| *tok == Token::Name));
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved("class"));
        assert!(is_reserved("return"));
        assert!(is_reserved("null"));
        assert!(!is_reserved("var"));
        assert!(!is_reserved("module"));
        assert!(!is_reserved("yield"));
    }

    #[test]
    fn test_no_shift_tokens() {
        let tokens = lex("a >> b >>> c");
        let gts = tokens
            .iter()
            .filter(|(tok, _)| *tok == Token::Gt)
            .count();
        assert_eq!(gts, 5);
    }

    #[test]
    fn test_shift_assignments_are_single_tokens() {
        assert_eq!(lex(">>=")[0].0, Token::ShrEq);
        assert_eq!(lex(">>>=")[0].0, Token::UshrEq);
        assert_eq!(lex("<<=")[0].0, Token::ShlEq);
        assert_eq!(lex("<<")[0].0, Token::Shl);
    }

    #[test]
    fn test_number_suffixes() {
        assert_eq!(lex("10L"), vec![(Token::Number, "10L")]);
        assert_eq!(lex("1.5f"), vec![(Token::Number, "1.5f")]);
        assert_eq!(lex("0xFF_FFL"), vec![(Token::Number, "0xFF_FFL")]);
        assert_eq!(lex("0b1010"), vec![(Token::Number, "0b1010")]);
        assert_eq!(lex(".5d"), vec![(Token::Number, ".5d")]);
    }

    #[test]
    fn test_ellipsis_vs_dot() {
        assert_eq!(lex("...")[0].0, Token::Ellipsis);
        assert_eq!(lex(".")[0].0, Token::Dot);
    }

    #[test]
    fn test_char_and_string() {
        assert_eq!(lex(r#""hi\n""#)[0].0, Token::Str);
        assert_eq!(lex(r"'\''")[0].0, Token::CharLit);
    }
}
