//! Barlines and repeat markers
//!
//! A barline bounds a bar. Repeat markers are barlines with a non-zero
//! repeat count.

use serde::{Deserialize, Serialize};

use crate::parse::tokens::TokenKind;

/// Barline styles as written in ABC
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarlineType {
    #[default]
    Single,         // |
    Dotted,         // .|
    ThinThin,       // ||
    ThinThick,      // |]
    ThickThin,      // [|
    StartRepeat,    // |:
    EndRepeat,      // :|
    StartEndRepeat, // :: :|: :||:
}

impl BarlineType {
    /// Parse barline from string
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "|" => Some(BarlineType::Single),
            ".|" => Some(BarlineType::Dotted),
            "||" => Some(BarlineType::ThinThin),
            "|]" => Some(BarlineType::ThinThick),
            "[|" => Some(BarlineType::ThickThin),
            "|:" => Some(BarlineType::StartRepeat),
            ":|" => Some(BarlineType::EndRepeat),
            "::" | ":|:" | ":||:" => Some(BarlineType::StartEndRepeat),
            _ => None,
        }
    }

    /// Barline style for a scanned token kind
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        let barline_type = match kind {
            TokenKind::Barline => BarlineType::Single,
            TokenKind::DottedBarline => BarlineType::Dotted,
            TokenKind::ThinThinDoubleBarline => BarlineType::ThinThin,
            TokenKind::ThinThickDoubleBarline => BarlineType::ThinThick,
            TokenKind::ThickThinDoubleBarline => BarlineType::ThickThin,
            TokenKind::StartRepeat => BarlineType::StartRepeat,
            TokenKind::EndRepeat => BarlineType::EndRepeat,
            TokenKind::StartEndRepeats => BarlineType::StartEndRepeat,
            _ => return None,
        };
        Some(barline_type)
    }

    /// ABC spelling of the barline
    pub fn symbol(&self) -> &'static str {
        match self {
            BarlineType::Single => "|",
            BarlineType::Dotted => ".|",
            BarlineType::ThinThin => "||",
            BarlineType::ThinThick => "|]",
            BarlineType::ThickThin => "[|",
            BarlineType::StartRepeat => "|:",
            BarlineType::EndRepeat => ":|",
            BarlineType::StartEndRepeat => "::",
        }
    }

    pub fn is_repeat(&self) -> bool {
        matches!(
            self,
            BarlineType::StartRepeat | BarlineType::EndRepeat | BarlineType::StartEndRepeat
        )
    }
}

/// Boundary between bars
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BarLine {
    pub barline_type: BarlineType,
    /// 0 for a plain barline, otherwise the number of repetitions
    pub repeat: u32,
}

impl BarLine {
    pub fn new(barline_type: BarlineType) -> Self {
        let repeat = if barline_type.is_repeat() { 1 } else { 0 };
        Self {
            barline_type,
            repeat,
        }
    }

    /// Barline for a scanned token kind, `None` for non-barline kinds
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        BarlineType::from_token_kind(kind).map(Self::new)
    }

    /// Set the number of repetitions (e.g. "play 3 times")
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat > 0
    }
}
