use crate::config::Config;
use crate::types::Token;
use crate::{Error, Result};

use std::borrow::Cow;

/// Cursor over JSON input text.
///
/// The scanner is the decoding source: `read` consumes exactly one JSON
/// fragment into a target and leaves the cursor on the first character past
/// it, so several fragments can be pulled from the same text in turn.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    config: Config,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner::with_config(input, Config::default())
    }

    pub fn with_config(input: &'a str, config: Config) -> Self {
        Scanner {
            input,
            pos: 0,
            depth: 0,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// True when only whitespace is left.
    pub fn is_at_end(&mut self) -> bool {
        self.peek_non_ws().is_none()
    }

    /// Fails unless only whitespace is left.
    pub fn finish(&mut self) -> Result<()> {
        match self.peek_non_ws() {
            None => Ok(()),
            Some(_) => Err(Error::TrailingCharacters { offset: self.pos }),
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(' ' | '\n' | '\t' | '\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Skips whitespace and returns the next character without consuming it.
    pub fn peek_non_ws(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek()
    }

    /// Skips whitespace and consumes the next character.
    pub fn read_non_ws(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.bump()
    }

    /// Consumes the next non-whitespace character, failing unless it is `symbol`.
    pub fn expect(&mut self, symbol: char) -> Result<()> {
        self.skip_whitespace();
        let offset = self.pos;
        match self.bump() {
            Some(c) if c == symbol => Ok(()),
            found => Err(Error::StructuralMismatch {
                expected: Token::Char(symbol),
                found: found.into(),
                offset,
            }),
        }
    }

    /// Consumes the separator or closing delimiter after a compound element.
    /// Returns `true` when another element follows.
    pub(crate) fn separator(&mut self, close: char) -> Result<bool> {
        self.skip_whitespace();
        let offset = self.pos;
        match self.bump() {
            Some(',') => Ok(true),
            Some(c) if c == close => Ok(false),
            found => Err(Error::StructuralMismatch {
                expected: Token::Either(',', close),
                found: found.into(),
                offset,
            }),
        }
    }

    /// Consumes `close` if it is the next non-whitespace character.
    pub(crate) fn close_if_empty(&mut self, close: char) -> bool {
        if self.peek_non_ws() == Some(close) {
            self.pos += close.len_utf8();
            true
        } else {
            false
        }
    }

    /// Runs `f` one nesting level deeper, bounded by `Config::max_depth`.
    pub(crate) fn nest<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        if self.depth >= self.config.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.config.max_depth,
                offset: self.pos,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Consumes a run of characters that may make up a numeral.
    pub(crate) fn numeral(&mut self) -> &'a str {
        let start = self.pos;
        while let Some('0'..='9' | '-' | '+' | '.' | 'e' | 'E') = self.peek() {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Consumes a run of ASCII letters, as in `true` or `null`.
    pub(crate) fn word(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().map_or(false, |c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Parses the body of a string whose opening quote was already consumed,
    /// through the closing quote. Borrows from the input unless the string
    /// contains escapes.
    pub(crate) fn parse_str(&mut self) -> Result<Cow<'a, str>> {
        let bytes = self.input.as_bytes();
        // Index of the first byte not yet copied into the scratch space.
        let mut start = self.pos;
        let mut buffer: Option<String> = None;

        loop {
            while self.pos < bytes.len() && !ESCAPE[bytes[self.pos] as usize] {
                self.pos += 1;
            }

            let offset = self.pos;
            match bytes.get(self.pos) {
                None => {
                    return Err(Error::StructuralMismatch {
                        expected: Token::Char('"'),
                        found: Token::EndOfInput,
                        offset,
                    })
                }
                Some(b'"') => {
                    let chunk = &self.input[start..self.pos];
                    self.pos += 1;
                    return Ok(match buffer {
                        None => Cow::Borrowed(chunk),
                        Some(mut buffer) => {
                            buffer.push_str(chunk);
                            Cow::Owned(buffer)
                        }
                    });
                }
                Some(b'\\') => {
                    let buffer = buffer.get_or_insert_with(String::new);
                    buffer.push_str(&self.input[start..self.pos]);
                    self.pos += 1;
                    self.parse_escape(buffer)?;
                    start = self.pos;
                }
                Some(&control) => {
                    return Err(Error::StructuralMismatch {
                        expected: Token::Char('"'),
                        found: Token::Char(char::from(control)),
                        offset,
                    })
                }
            }
        }
    }

    fn parse_escape(&mut self, buffer: &mut String) -> Result<()> {
        let offset = self.pos - 1;
        let unescaped = match self.bump() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\x08',
            Some('f') => '\x0c',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => self
                .parse_hex4()
                .and_then(char::from_u32)
                .ok_or(Error::InvalidEscape { offset })?,
            _ => return Err(Error::InvalidEscape { offset }),
        };
        buffer.push(unescaped);
        Ok(())
    }

    // Surrogate pairs are not recombined; a lone surrogate is rejected by
    // `char::from_u32`.
    fn parse_hex4(&mut self) -> Option<u32> {
        let hex = self.input.get(self.pos..self.pos + 4)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let code = u32::from_str_radix(hex, 16).ok()?;
        self.pos += 4;
        Some(code)
    }
}

const CT: bool = true; // control character \x00..=\x1F
const QU: bool = true; // quote \x22
const BS: bool = true; // backslash \x5C
const O: bool = false; // allow unescaped

// Lookup table of bytes that end a run of plain string content. A value of
// true at index i means byte i needs attention inside a string.
#[rustfmt::skip]
static ESCAPE: [bool; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 0
    CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, CT, // 1
     O,  O, QU,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // 2
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // 3
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // 4
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, BS,  O,  O,  O, // 5
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // 6
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // 7
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // 8
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // 9
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // A
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // B
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // C
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // D
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // E
     O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O,  O, // F
];

#[cfg(test)]
mod tests {
    use super::*;

    fn string(input: &str) -> Result<Cow<'_, str>> {
        let mut scanner = Scanner::new(input);
        scanner.expect('"')?;
        scanner.parse_str()
    }

    #[test]
    fn peek_does_not_consume() {
        let mut scanner = Scanner::new("  \n\t x");
        assert_eq!(scanner.peek_non_ws(), Some('x'));
        assert_eq!(scanner.position(), 5);
        assert_eq!(scanner.peek_non_ws(), Some('x'));
        assert_eq!(scanner.read_non_ws(), Some('x'));
        assert_eq!(scanner.read_non_ws(), None);
        assert!(scanner.is_at_end());
    }

    #[test]
    fn expect_reports_both_characters() {
        let mut scanner = Scanner::new(" [1]");
        assert_eq!(scanner.expect('['), Ok(()));
        assert_eq!(
            scanner.expect(','),
            Err(Error::StructuralMismatch {
                expected: Token::Char(','),
                found: Token::Char('1'),
                offset: 2,
            })
        );
    }

    #[test]
    fn expect_at_end_of_input() {
        let mut scanner = Scanner::new("   ");
        assert_eq!(
            scanner.expect('}'),
            Err(Error::StructuralMismatch {
                expected: Token::Char('}'),
                found: Token::EndOfInput,
                offset: 3,
            })
        );
    }

    #[test]
    fn plain_strings_are_borrowed() {
        assert!(matches!(string(r#""hello""#), Ok(Cow::Borrowed("hello"))));
        assert!(matches!(string(r#""""#), Ok(Cow::Borrowed(""))));
    }

    #[test]
    fn escapes_are_decoded() {
        let text = string(r#""a\"b\\c\/d\n\té\u0001""#).unwrap();
        assert_eq!(text, "a\"b\\c/d\n\té\u{1}");
    }

    #[test]
    fn multibyte_text_passes_through() {
        assert_eq!(string("\"日本 ✓\"").unwrap(), "日本 ✓");
    }

    #[test]
    fn missing_closing_quote() {
        assert!(matches!(
            string(r#""abc"#),
            Err(Error::StructuralMismatch { found: Token::EndOfInput, .. })
        ));
    }

    #[test]
    fn bad_escapes() {
        assert_eq!(string(r#""\x""#), Err(Error::InvalidEscape { offset: 1 }));
        assert_eq!(string(r#""\u12""#), Err(Error::InvalidEscape { offset: 1 }));
        assert_eq!(string(r#""\ud800""#), Err(Error::InvalidEscape { offset: 1 }));
        assert_eq!(string(r#""\u+abc""#), Err(Error::InvalidEscape { offset: 1 }));
    }

    #[test]
    fn raw_control_characters_are_rejected() {
        assert!(matches!(
            string("\"a\nb\""),
            Err(Error::StructuralMismatch { found: Token::Char('\n'), offset: 2, .. })
        ));
    }

    #[test]
    fn trailing_characters() {
        let mut scanner = Scanner::new("x ");
        assert_eq!(scanner.finish(), Err(Error::TrailingCharacters { offset: 0 }));
        scanner.bump();
        assert_eq!(scanner.finish(), Ok(()));
    }

    #[test]
    fn nesting_is_bounded() {
        let mut scanner = Scanner::with_config("", Config::default().with_max_depth(1));
        let nested = scanner.nest(|s| s.nest(|_| Ok(())));
        assert_eq!(nested, Err(Error::DepthLimitExceeded { limit: 1, offset: 0 }));
        assert_eq!(scanner.nest(|_| Ok(7)), Ok(7));
    }
}
