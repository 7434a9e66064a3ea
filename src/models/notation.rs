//! Musical content of a bar
//!
//! Every element that can appear inside a bar is a `Notation` variant and
//! reports its length as a multiple of the tune's unit note length (L:).
//! Elements that take no time (chord symbols, annotations, barlines)
//! report zero.

use num_rational::Rational32;
use num_traits::{CheckedAdd, CheckedMul};
use serde::{Deserialize, Serialize};

use crate::models::barlines::BarLine;
use crate::models::tune::NoteLength;
use crate::parse::tokens::TokenKind;

/// Rational type for durations
pub type Rational = Rational32;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accidental {
    Sharp,   // ^
    Natural, // =
    Flat,    // _
}

impl Accidental {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Sharp => Some(Accidental::Sharp),
            TokenKind::Natural => Some(Accidental::Natural),
            TokenKind::Flat => Some(Accidental::Flat),
            _ => None,
        }
    }
}

/// A pitched note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// Note letter as written (case encodes the octave)
    pub pitch: char,
    pub accidental: Option<Accidental>,
    /// Multiple of the unit note length
    pub length: Rational,
}

impl Note {
    pub fn new(pitch: char) -> Self {
        Self {
            pitch,
            accidental: None,
            length: Rational::from_integer(1),
        }
    }

    /// Duration in whole notes under the given unit note length
    pub fn duration(&self, unit: &NoteLength) -> Option<Rational> {
        unit.as_ratio()?.checked_mul(&self.length)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestKind {
    Visible,   // z
    Invisible, // x
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Rest {
    pub kind: RestKind,
    pub length: Rational,
}

/// Guitar chord symbol, e.g. "Am"
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChordSymbol {
    pub name: String,
}

/// Placement of a text annotation relative to the staff
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationPosition {
    Above, // ^
    Below, // _
    Left,  // <
    Right, // >
    Free,  // @
}

impl AnnotationPosition {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '^' => Some(AnnotationPosition::Above),
            '_' => Some(AnnotationPosition::Below),
            '<' => Some(AnnotationPosition::Left),
            '>' => Some(AnnotationPosition::Right),
            '@' => Some(AnnotationPosition::Free),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub position: AnnotationPosition,
    pub text: String,
}

/// Element of a bar
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Notation {
    Note(Note),
    Rest(Rest),
    ChordSymbol(ChordSymbol),
    Annotation(Annotation),
    BarLine(BarLine),
}

impl Notation {
    /// Length as a multiple of the unit note length
    pub fn length(&self) -> Rational {
        match self {
            Notation::Note(note) => note.length,
            Notation::Rest(rest) => rest.length,
            Notation::ChordSymbol(_) | Notation::Annotation(_) | Notation::BarLine(_) => {
                Rational::from_integer(0)
            }
        }
    }
}

/// Notation between two barlines
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bar {
    pub left: BarLine,
    pub notation: Vec<Notation>,
    pub right: BarLine,
}

impl Bar {
    pub fn new(left: BarLine, right: BarLine) -> Self {
        Self {
            left,
            notation: Vec::new(),
            right,
        }
    }

    pub fn push(&mut self, notation: Notation) {
        self.notation.push(notation);
    }

    /// Sum of the lengths of everything in the bar, `None` on overflow
    pub fn length(&self) -> Option<Rational> {
        self.notation
            .iter()
            .try_fold(Rational::from_integer(0), |total, n| total.checked_add(&n.length()))
    }
}
