//! Parsing module for ABC tune books
//!
//! Text flows one way: input text → `Scanner` → tokens → `Parser` → tunes.
//! The functions here are thin wrappers that wire the two stages together.

pub mod errors;
pub mod fields;
pub mod parser;
pub mod scanner;
pub mod settings;
pub mod tokens;

// Re-export commonly used types
pub use errors::*;
pub use fields::*;
pub use parser::*;
pub use scanner::*;
pub use settings::*;
pub use tokens::*;

use std::io::Read;

use crate::models::Tune;

pub type Result<T> = std::result::Result<T, AbcError>;

/// Read an ABC stream into tunes with default settings
pub fn read<R: Read>(reader: R) -> Result<Vec<Tune>> {
    read_with(reader, &ParseSettings::default())
}

/// Read an ABC stream into tunes
///
/// The whole stream is read and decoded as UTF-8 before scanning.
pub fn read_with<R: Read>(mut reader: R, settings: &ParseSettings) -> Result<Vec<Tune>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_str_with(&input, settings)
}

/// Parse ABC text into tunes with default settings
pub fn parse_str(input: &str) -> Result<Vec<Tune>> {
    parse_str_with(input, &ParseSettings::default())
}

pub fn parse_str_with(input: &str, settings: &ParseSettings) -> Result<Vec<Tune>> {
    let scanner = Scanner::with_name(settings.source_name.clone(), input);
    let tunes = Parser::with_settings(scanner, settings.clone()).parse()?;
    Ok(tunes)
}

/// Scan the whole input, terminal token included
pub fn tokenize(input: &str) -> Vec<Token> {
    Scanner::new(input).collect()
}
