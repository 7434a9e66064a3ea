//! ABC Notation Parser
//!
//! Reads ABC tune books into structured tune records. A character-level
//! scanner turns the text into typed tokens; a structural parser consumes
//! the tokens and assembles one `Tune` per `X:` field.

pub mod models;
pub mod parse;

// Re-export commonly used types
pub use models::*;
pub use parse::{parse_str, parse_str_with, read, read_with, tokenize};
pub use parse::{
    AbcError, ParseError, ParseSettings, ScanError, Token, TokenKind, UnknownFieldPolicy,
};
