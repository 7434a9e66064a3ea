//! Error types for ABC parsing
//!
//! Scan errors come from the scanner's terminal error token, parse errors
//! from the structural parser. Both are fatal: there is no recovery and no
//! partial result. `AbcError` is what the reader entry points return.

use std::num::ParseIntError;

use thiserror::Error;

use crate::parse::tokens::{describe_kinds, Token, TokenKind};

/// Top-level error type for reading ABC input
#[derive(Debug, Error)]
pub enum AbcError {
    /// The input stream could not be read or was not valid UTF-8
    #[error("failed to read ABC input: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Unrecognized character or malformed escape in the input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScanError {
    /// Formatted message, prefixed with the input name and line
    pub message: String,
    pub line: usize,
    pub offset: usize,
}

impl From<&Token> for ScanError {
    fn from(token: &Token) -> Self {
        Self {
            message: token.text.clone(),
            line: token.line,
            offset: token.offset,
        }
    }
}

/// Fatal structural errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Next token missing or of the wrong kind
    #[error("line {line}: expected {}, got {found}", describe_kinds(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        /// Display form of the offending token, `nothing` when the stream ended
        found: String,
        line: usize,
    },

    /// Header field letter with no defined handling
    #[error("line {line}: unhandled field {field:?}")]
    UnhandledField { field: String, line: usize },

    /// Digits in a field that do not convert to an integer
    #[error("line {line}: invalid number {text:?}: {source}")]
    InvalidNumber {
        text: String,
        line: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: unsupported meter {text:?}")]
    UnsupportedMeter { text: String, line: usize },
}

impl ParseError {
    /// Line the error was detected on
    pub fn line(&self) -> usize {
        match self {
            ParseError::Scan(err) => err.line,
            ParseError::UnexpectedToken { line, .. }
            | ParseError::UnhandledField { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::UnsupportedMeter { line, .. } => *line,
        }
    }
}
