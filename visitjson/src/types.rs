use core::fmt::{self, Display};
use thiserror::Error;

/// A lexical unit named in decoding diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Char(char),
    /// One of two delimiters, typically a separator or a closing bracket.
    Either(char, char),
    Literal(String),
    Boolean,
    Number,
    Value,
    EndOfInput,
}

impl Display for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Char(c) => write!(formatter, "'{}'", c.escape_default()),
            Token::Either(a, b) => write!(formatter, "'{}' or '{}'", a.escape_default(), b.escape_default()),
            Token::Literal(s) => write!(formatter, "`{}`", s),
            Token::Boolean => formatter.write_str("`true` or `false`"),
            Token::Number => formatter.write_str("a number"),
            Token::Value => formatter.write_str("a JSON value"),
            Token::EndOfInput => formatter.write_str("end of input"),
        }
    }
}

impl From<Option<char>> for Token {
    fn from(c: Option<char>) -> Self {
        c.map_or(Token::EndOfInput, Token::Char)
    }
}

/// Decoding failure. Offsets are byte positions into the input text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("expected {expected} but got {found} at offset {offset}")]
    StructuralMismatch {
        expected: Token,
        found: Token,
        offset: usize,
    },

    #[error("unknown field `{name}` at offset {offset}")]
    UnknownField { name: String, offset: usize },

    #[error("malformed number `{text}` at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("expected a single character but got {text:?} at offset {offset}")]
    InvalidCharacter { text: String, offset: usize },

    #[error("fixed-size array needs exactly {expected} elements (offset {offset})")]
    LengthMismatch { expected: usize, offset: usize },

    #[error("nesting deeper than {limit} levels at offset {offset}")]
    DepthLimitExceeded { limit: usize, offset: usize },

    #[error("trailing characters at offset {offset}")]
    TrailingCharacters { offset: usize },
}

impl Error {
    /// Byte offset into the input where decoding stopped.
    pub fn offset(&self) -> usize {
        match *self {
            Error::StructuralMismatch { offset, .. }
            | Error::UnknownField { offset, .. }
            | Error::InvalidNumber { offset, .. }
            | Error::InvalidEscape { offset }
            | Error::InvalidCharacter { offset, .. }
            | Error::LengthMismatch { offset, .. }
            | Error::DepthLimitExceeded { offset, .. }
            | Error::TrailingCharacters { offset } => offset,
        }
    }
}

/// Result type returned by decoding functions.
pub type Result<T> = core::result::Result<T, Error>;
