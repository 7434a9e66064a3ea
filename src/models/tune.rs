//! Tune records and their header attributes
//!
//! A `Tune` is created when an `X:` field is parsed and collects every
//! header field up to the next `X:` or the end of input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::notation::{Bar, Rational};

/// Time signature, e.g. 6/8 or the additive 4+2/4
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Meter {
    /// Numerator groups in input order
    pub numerator: Vec<u32>,
    pub denominator: u32,
}

impl Meter {
    pub fn new(numerator: Vec<u32>, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `C`, common time
    pub fn common_time() -> Self {
        Self::new(vec![4], 4)
    }

    /// `C|`, cut time
    pub fn cut_time() -> Self {
        Self::new(vec![2], 2)
    }

    /// Total beats per bar across all numerator groups, `None` on overflow
    pub fn beats(&self) -> Option<u32> {
        self.numerator
            .iter()
            .try_fold(0u32, |total, n| total.checked_add(*n))
    }

    /// Length of a full bar in whole notes, `None` for a free meter
    pub fn bar_length(&self) -> Option<Rational> {
        if self.denominator == 0 {
            return None;
        }
        let beats = i32::try_from(self.beats()?).ok()?;
        let denominator = i32::try_from(self.denominator).ok()?;
        Some(Rational::new(beats, denominator))
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self.numerator.iter().map(u32::to_string).collect();
        write!(f, "{}/{}", groups.join("+"), self.denominator)
    }
}

/// Default note duration, e.g. 1/8
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoteLength {
    pub numerator: u32,
    pub denominator: u32,
}

impl NoteLength {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Unit length in whole notes, `None` when unset
    pub fn as_ratio(&self) -> Option<Rational> {
        if self.denominator == 0 {
            return None;
        }
        let numerator = i32::try_from(self.numerator).ok()?;
        let denominator = i32::try_from(self.denominator).ok()?;
        Some(Rational::new(numerator, denominator))
    }
}

/// Key signature as written in the `K:` field
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One musical piece from an ABC tune book
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tune {
    /// X: reference number, fixed at creation
    sequence: u32,

    pub title: String,
    pub composer: String,
    pub rhythm: String,
    pub origin: String,
    pub key: Key,
    pub meter: Meter,
    pub note_length: NoteLength,

    /// A: (deprecated in ABC 2.1)
    pub area: String,
    pub book: String,
    pub discography: String,
    pub file_url: String,
    pub group: String,
    /// H: lines, one entry per occurrence
    pub history: Vec<String>,
    /// N: lines, one entry per occurrence
    pub comments: Vec<String>,
    pub source: String,
    pub transcription: String,
    /// W: lines, one entry per occurrence
    pub words_after_tune: Vec<String>,

    pub bars: Vec<Bar>,
}

impl Tune {
    /// Create an empty tune with the given reference number
    pub fn new(sequence: u32) -> Self {
        Self {
            sequence,
            title: String::new(),
            composer: String::new(),
            rhythm: String::new(),
            origin: String::new(),
            key: Key::default(),
            meter: Meter::default(),
            note_length: NoteLength::default(),
            area: String::new(),
            book: String::new(),
            discography: String::new(),
            file_url: String::new(),
            group: String::new(),
            history: Vec::new(),
            comments: Vec::new(),
            source: String::new(),
            transcription: String::new(),
            words_after_tune: Vec::new(),
            bars: Vec::new(),
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tune_is_empty() {
        let tune = Tune::new(7);
        assert_eq!(tune.sequence(), 7);
        assert!(tune.title.is_empty());
        assert!(tune.history.is_empty());
        assert_eq!(tune.meter, Meter::default());
        assert!(tune.bars.is_empty());
    }

    #[test]
    fn test_meter_bar_length() {
        assert_eq!(Meter::new(vec![6], 8).bar_length(), Some(Rational::new(3, 4)));
        // Additive meters sum their groups
        assert_eq!(Meter::new(vec![3, 2, 3], 8).bar_length(), Some(Rational::new(1, 1)));
        assert_eq!(Meter::default().bar_length(), None);
    }

    #[test]
    fn test_meter_overflow_has_no_bar_length() {
        let meter = Meter::new(vec![u32::MAX, 1], 4);
        assert_eq!(meter.beats(), None);
        assert_eq!(meter.bar_length(), None);

        // Fits in u32 but not in the rational's i32
        let meter = Meter::new(vec![u32::MAX], 4);
        assert_eq!(meter.beats(), Some(u32::MAX));
        assert_eq!(meter.bar_length(), None);
    }

    #[test]
    fn test_meter_display() {
        assert_eq!(Meter::new(vec![4, 2], 4).to_string(), "4+2/4");
        assert_eq!(Meter::cut_time().to_string(), "2/2");
    }

    #[test]
    fn test_note_length_ratio() {
        assert_eq!(NoteLength::new(1, 8).as_ratio(), Some(Rational::new(1, 8)));
        assert_eq!(NoteLength::default().as_ratio(), None);
    }
}
