//! Error types for TOON encoding and decoding.
//!
//! Decoding errors carry the 1-based line number recorded during line
//! pre-tokenization, so a failing document can be located without re-parsing.
//! The first error on any path aborts the whole operation; partially built
//! values are dropped by ownership before the error surfaces.
//!
//! ## Examples
//!
//! ```rust
//! use toon::{decode, Error};
//!
//! let result = decode("items[2]: a");
//! assert!(matches!(result, Err(Error::ArrayLengthMismatch { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Every error the codec can produce.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A backslash followed by anything other than `\ " n r t` inside a
    /// quoted string.
    #[error("invalid escape sequence at line {line}")]
    InvalidEscape { line: usize },

    /// A quoted string with no closing quote, or a lone trailing backslash.
    #[error("unterminated string at line {line}")]
    UnterminatedString { line: usize },

    /// A line inside an object carried no `:` after its key.
    #[error("missing ':' after key at line {line}")]
    MissingColon { line: usize },

    /// The bracketed portion of an array header could not be parsed.
    #[error("invalid array header at line {line}: {reason}")]
    InvalidArrayHeader { line: usize, reason: String },

    /// The header's declared delimiter disagrees with the field list.
    #[error("delimiter mismatch in array header at line {line}")]
    DelimiterMismatch { line: usize },

    /// An empty or malformed key.
    #[error("invalid key at line {line}")]
    InvalidKey { line: usize },

    /// A byte that cannot appear at this position.
    #[error("unexpected character {ch:?} at line {line}")]
    UnexpectedCharacter { line: usize, ch: char },

    /// The number of rows, items, or inline values does not match the
    /// declared `[N]` length.
    #[error("array declared {expected} elements but {found} were found (line {line})")]
    ArrayLengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A tabular row whose value count differs from the field count.
    #[error("row at line {line} has {found} values, expected {expected}")]
    RowWidthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Leading spaces not divisible by the indent size.
    #[error("indentation of {found} spaces at line {line} is not a multiple of {unit}")]
    InvalidIndentation {
        line: usize,
        found: usize,
        unit: usize,
    },

    /// A tab byte in the indentation prefix.
    #[error("tab character in indentation at line {line}")]
    TabIndentation { line: usize },

    /// A line indented deeper than its context allows.
    #[error("unexpected indentation at line {line}")]
    UnexpectedIndent { line: usize },

    /// A blank line inside an in-progress array body.
    #[error("blank line inside array at line {line}")]
    BlankLineInArray { line: usize },

    /// A hyphen line that is not a well-formed list item, or a list item
    /// outside an array body.
    #[error("invalid list item at line {line}")]
    InvalidListItem { line: usize },

    /// Nesting depth exceeded [`DecodeOptions::max_depth`].
    ///
    /// [`DecodeOptions::max_depth`]: crate::DecodeOptions
    #[error("nesting depth exceeds the configured limit of {limit}")]
    NestingError { limit: usize },

    /// Path expansion hit a key whose existing and incoming values disagree
    /// on being an object.
    #[error("path expansion conflict at key {key:?}")]
    ExpansionConflict { key: String },

    /// A token that was required to be numeric but is not.
    #[error("invalid number {token:?}")]
    InvalidNumber { token: String },

    /// A numeric token too large for its target representation.
    #[error("numeric overflow at line {line}")]
    Overflow { line: usize },

    /// Input rejected before parsing began (BOM, invalid UTF-8, trailing
    /// content after a root value).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The document ended where more content was required.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// Message produced through the serde error traits.
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn invalid_header(line: usize, reason: &str) -> Self {
        Error::InvalidArrayHeader {
            line,
            reason: reason.to_string(),
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
