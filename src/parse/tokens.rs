//! Token types produced by the scanner
//!
//! A token is a typed, positioned fragment of ABC text. Tokens own their
//! text and keep no reference back to the scanner that produced them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Token kinds for ABC notation
///
/// Some kinds are reserved for grammar extensions and are never produced
/// by the current scanner (URL, unit, key, meter, macro, voice, equals,
/// minor, exclamation, star, quote, backslash).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
pub enum TokenKind {
    /// Scan failure; the token text is the error message
    Error = 0,
    FieldName = 1,
    Colon = 2,
    String = 3,
    Url = 4,
    Unit = 5,
    Key = 6,
    Meter = 7,
    Macro = 8,
    Voice = 9,
    OpenParen = 10,
    CloseParen = 11,
    Letter = 12,
    Number = 13,
    Divide = 14,
    Plus = 15,
    Minus = 16,
    Equals = 17,
    Sharp = 18,
    Natural = 19,
    Flat = 20,
    Minor = 21,
    Exclamation = 22,
    Star = 23,
    Percent = 24,
    DottedBarline = 25,
    Barline = 26,
    ThinThickDoubleBarline = 27,
    ThinThinDoubleBarline = 28,
    ThickThinDoubleBarline = 29,
    StartRepeat = 30,
    EndRepeat = 31,
    StartEndRepeats = 32,
    Quote = 33,
    Newline = 34,
    Space = 35,
    Backslash = 36,
    GreaterThan = 37,
    LessThan = 38,
    Comment = 39,
    InvisibleRest = 40,
    Rest = 41,
    MultiMeasureRest = 42,
    Chord = 43,
    AnnotationPosition = 44,
    Annotation = 45,
    VariantNumber = 46,
    VariantComma = 47,
    VariantRange = 48,
    EndOfInput = 49,
}

impl TokenKind {
    /// Human readable name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Error => "error",
            TokenKind::FieldName => "field name",
            TokenKind::Colon => "colon",
            TokenKind::String => "string",
            TokenKind::Url => "url",
            TokenKind::Unit => "unit",
            TokenKind::Key => "key",
            TokenKind::Meter => "meter",
            TokenKind::Macro => "macro",
            TokenKind::Voice => "voice",
            TokenKind::OpenParen => "open paren",
            TokenKind::CloseParen => "close paren",
            TokenKind::Letter => "letter",
            TokenKind::Number => "number",
            TokenKind::Divide => "divide",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Equals => "equals",
            TokenKind::Sharp => "sharp",
            TokenKind::Natural => "natural",
            TokenKind::Flat => "flat",
            TokenKind::Minor => "minor",
            TokenKind::Exclamation => "exclamation",
            TokenKind::Star => "star",
            TokenKind::Percent => "percent",
            TokenKind::DottedBarline => "dotted barline",
            TokenKind::Barline => "barline",
            TokenKind::ThinThickDoubleBarline => "thin-thick double barline",
            TokenKind::ThinThinDoubleBarline => "thin-thin double barline",
            TokenKind::ThickThinDoubleBarline => "thick-thin double barline",
            TokenKind::StartRepeat => "start repeat",
            TokenKind::EndRepeat => "end repeat",
            TokenKind::StartEndRepeats => "start-end repeats",
            TokenKind::Quote => "quote",
            TokenKind::Newline => "newline",
            TokenKind::Space => "space",
            TokenKind::Backslash => "backslash",
            TokenKind::GreaterThan => "greater than",
            TokenKind::LessThan => "less than",
            TokenKind::Comment => "comment",
            TokenKind::InvisibleRest => "invisible rest",
            TokenKind::Rest => "rest",
            TokenKind::MultiMeasureRest => "multi-measure rest",
            TokenKind::Chord => "chord",
            TokenKind::AnnotationPosition => "annotation position",
            TokenKind::Annotation => "annotation",
            TokenKind::VariantNumber => "variant number",
            TokenKind::VariantComma => "variant comma",
            TokenKind::VariantRange => "variant range",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Format a set of kinds as "a, b or c"
pub fn describe_kinds(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => String::from("nothing"),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(|k| k.name()).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

/// Token with position metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text of the token, or the message of an error token
    pub text: String,
    /// Byte offset of the token start in the input
    pub offset: usize,
    /// 1-based line number of the token start
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            line,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Error => write!(f, "{}", self.text),
            _ if self.text.chars().count() > 10 => {
                let head: String = self.text.chars().take(10).collect();
                write!(f, "{:?}...", head)
            }
            _ => write!(f, "{:?}", self.text),
        }
    }
}
