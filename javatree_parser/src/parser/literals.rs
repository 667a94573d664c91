//! String and character literal re-encoding
//!
//! Literals arrive from the lexer with their original quoting and escape
//! sequences. The parser normalizes them into canonical Java source form:
//! escapes are decoded, then re-emitted with `\t`, `\n`, `\r`, `\\` and
//! the relevant quote escaped by name and every other unprintable
//! character as a `\uXXXX` escape. Characters U+0000–U+00FF therefore
//! always come out as `\u00XX`, never in a non-Java form.

use crate::error::ParseResult;

use super::Parser;

impl<'a> Parser<'a> {
    /// Consume the current string literal token and return it re-encoded
    pub(crate) fn reencode_string_token(&mut self) -> ParseResult<String> {
        let token = *self.token();
        let body = &token.text[1..token.text.len() - 1];
        let decoded = decode_escapes(body).map_err(|msg| self.err_at(msg, &token))?;
        self.next();
        Ok(encode(&decoded, '"'))
    }

    /// Consume the current character literal token and return it
    /// re-encoded
    pub(crate) fn reencode_char_token(&mut self) -> ParseResult<String> {
        let token = *self.token();
        let body = &token.text[1..token.text.len() - 1];
        let decoded = decode_escapes(body).map_err(|msg| self.err_at(msg, &token))?;
        self.next();
        Ok(encode(&decoded, '\''))
    }
}

/// Decode Java escape sequences into the characters they denote
fn decode_escapes(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            return Err("invalid escape sequence '\\'".to_string());
        };
        match escape {
            'b' => out.push('\u{0008}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'f' => out.push('\u{000c}'),
            'r' => out.push('\r'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'u' => {
                // Java allows any number of `u`s in a unicode escape.
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let mut value: u32 = 0;
                for _ in 0..4 {
                    let Some(digit) = chars.next().and_then(|d| d.to_digit(16)) else {
                        return Err("invalid unicode escape".to_string());
                    };
                    value = value * 16 + digit;
                }
                let Some(ch) = char::from_u32(value) else {
                    return Err("invalid unicode escape".to_string());
                };
                out.push(ch);
            }
            '0'..='7' => {
                // Octal escape: up to three digits, at most 0377.
                let mut value = escape.to_digit(8).expect("octal digit");
                let extra = if escape <= '3' { 2 } else { 1 };
                for _ in 0..extra {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            chars.next();
                            value = value * 8 + digit;
                        }
                        None => break,
                    }
                }
                out.push((value as u8) as char);
            }
            other => return Err(format!("invalid escape sequence '\\{}'", other)),
        }
    }

    Ok(out)
}

/// Re-encode decoded text as a canonical Java literal with the given
/// quote character
fn encode(decoded: &str, quote: char) -> String {
    let mut out = String::with_capacity(decoded.len() + 2);
    out.push(quote);
    for c in decoded.chars() {
        match c {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            _ if c == quote => {
                out.push('\\');
                out.push(quote);
            }
            _ if is_printable(c) => out.push(c),
            _ => push_unicode_escape(&mut out, c),
        }
    }
    out.push(quote);
    out
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    // DEL through APC, soft hyphen, and zero-width/bidi/tag format
    // characters also get escaped.
    !matches!(
        c as u32,
        0x7f..=0xa0
            | 0xad
            | 0x200b..=0x200f
            | 0x2028..=0x202e
            | 0x2060..=0x2064
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0xe0000..=0xe007f
    )
}

/// Emit `\uXXXX`, as a surrogate pair for supplementary characters
/// (Java's `\u` escapes UTF-16 code units)
fn push_unicode_escape(out: &mut String, c: char) {
    let code = c as u32;
    if code > 0xffff {
        let value = code - 0x10000;
        let high = 0xd800 + (value >> 10);
        let low = 0xdc00 + (value & 0x3ff);
        out.push_str(&format!("\\u{:04x}\\u{:04x}", high, low));
    } else {
        out.push_str(&format!("\\u{:04x}", code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_escapes() {
        assert_eq!(decode_escapes(r"a\tb\n").unwrap(), "a\tb\n");
        assert_eq!(decode_escapes(r#"\""#).unwrap(), "\"");
        assert_eq!(decode_escapes(r"\\").unwrap(), "\\");
    }

    #[test]
    fn test_decode_unicode_and_octal() {
        assert_eq!(decode_escapes(r"\u0041").unwrap(), "A");
        assert_eq!(decode_escapes(r"\uu0041").unwrap(), "A");
        assert_eq!(decode_escapes(r"\101").unwrap(), "A");
        assert_eq!(decode_escapes(r"\0").unwrap(), "\0");
        assert_eq!(decode_escapes(r"\377").unwrap(), "\u{ff}");
    }

    #[test]
    fn test_decode_invalid_escape() {
        assert!(decode_escapes(r"\q").is_err());
        assert!(decode_escapes(r"\uZZZZ").is_err());
    }

    #[test]
    fn test_encode_control_characters() {
        assert_eq!(encode("a\tb", '"'), "\"a\\tb\"");
        assert_eq!(encode("\u{0008}", '"'), "\"\\u0008\"");
        assert_eq!(encode("\u{000c}", '"'), "\"\\u000c\"");
        assert_eq!(encode("\0", '"'), "\"\\u0000\"");
    }

    #[test]
    fn test_encode_high_bytes_as_u00xx() {
        // Bytes 0x00-0xff must come out as \u00XX, never \xNN.
        assert_eq!(encode("\u{0085}", '"'), "\"\\u0085\"");
        assert_eq!(encode("\u{00a0}", '"'), "\"\\u00a0\"");
        // Printable Latin-1 stays literal.
        assert_eq!(encode("é", '"'), "\"é\"");
    }

    #[test]
    fn test_encode_quotes() {
        assert_eq!(encode("say \"hi\"", '"'), "\"say \\\"hi\\\"\"");
        assert_eq!(encode("'", '"'), "\"'\"");
        assert_eq!(encode("'", '\''), "'\\''");
        assert_eq!(encode("\"", '\''), "'\"'");
    }

    #[test]
    fn test_encode_supplementary_as_surrogate_pair() {
        // U+10000 is unprintable-ish only if control; use a tag character
        // (U+E0001, a format character) which is not printable.
        assert_eq!(encode("\u{e0001}", '"'), "\"\\udb40\\udc01\"");
    }
}
