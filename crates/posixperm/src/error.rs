//! Error types for permission parsing.
//!
//! Parsing is the only fallible operation in this crate. Formatting and
//! conversions from raw bits always succeed.

use crate::Grammar;
use thiserror::Error;

/// Machine-readable error code interface.
///
/// Codes are UPPER_SNAKE_CASE, prefixed with `PERM_`, and stable across
/// versions so callers can match on them.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying with the same input may succeed.
    fn is_recoverable(&self) -> bool;
}

/// Errors produced when text cannot be turned into a [`Perm`](crate::Perm).
///
/// Every variant carries the offending input so the message can name it.
///
/// # Example
///
/// ```
/// use posixperm::{ErrorCode, Perm};
///
/// let err = Perm::parse("rwz").unwrap_err();
/// assert_eq!(err.code(), "PERM_UNRECOGNIZED");
/// assert_eq!(err.input(), "rwz");
/// assert_eq!(err.to_string(), r#"unrecognized permission syntax "rwz""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text matches none of the accepted grammars.
    #[error("unrecognized permission syntax {input:?}")]
    Unrecognized {
        /// The rejected text.
        input: String,
    },

    /// Octal digits describe a value wider than 32 bits.
    #[error("cannot parse {grammar} permission value {input:?}: value overflows 32 bits")]
    Overflow {
        /// Grammar the text was classified as.
        grammar: Grammar,
        /// The rejected text.
        input: String,
    },

    /// The text was classified but its decoder found an unexpected shape.
    #[error("cannot parse {grammar} permission value {input:?}: malformed {grammar} text")]
    Malformed {
        /// Grammar the text was classified as.
        grammar: Grammar,
        /// The rejected text.
        input: String,
    },

    /// Byte input that is not valid UTF-8.
    #[error("permission text is not valid UTF-8: {input:?}")]
    InvalidUtf8 {
        /// Lossy rendering of the rejected bytes.
        input: String,
    },
}

impl ParseError {
    pub(crate) fn unrecognized(input: &str) -> Self {
        Self::Unrecognized {
            input: input.to_string(),
        }
    }

    pub(crate) fn overflow(grammar: Grammar, input: &str) -> Self {
        Self::Overflow {
            grammar,
            input: input.to_string(),
        }
    }

    pub(crate) fn malformed(grammar: Grammar, input: &str) -> Self {
        Self::Malformed {
            grammar,
            input: input.to_string(),
        }
    }

    pub(crate) fn invalid_utf8(bytes: &[u8]) -> Self {
        Self::InvalidUtf8 {
            input: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Returns the text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::Unrecognized { input }
            | Self::Overflow { input, .. }
            | Self::Malformed { input, .. }
            | Self::InvalidUtf8 { input } => input,
        }
    }

    /// Returns the grammar the input was classified as, if any.
    #[must_use]
    pub fn grammar(&self) -> Option<Grammar> {
        match self {
            Self::Overflow { grammar, .. } | Self::Malformed { grammar, .. } => Some(*grammar),
            Self::Unrecognized { .. } | Self::InvalidUtf8 { .. } => None,
        }
    }
}

impl ErrorCode for ParseError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unrecognized { .. } => "PERM_UNRECOGNIZED",
            Self::Overflow { .. } => "PERM_OVERFLOW",
            Self::Malformed { .. } => "PERM_MALFORMED",
            Self::InvalidUtf8 { .. } => "PERM_INVALID_UTF8",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Same text, same answer.
        false
    }
}
