//! Header field table
//!
//! Maps the letter in front of a `Letter:value` header line to the field
//! it names. The scanner uses the table to pick how the value is lexed,
//! the parser uses it to decide where the value goes.

use serde::{Deserialize, Serialize};

/// Header fields recognized in a tune
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    /// X: reference number, starts a new tune
    Sequence,
    /// M: time signature
    Meter,
    /// L: unit note length
    NoteLength,
    /// K: key
    Key,
    Title,
    Composer,
    Rhythm,
    Origin,
    Area,
    Book,
    Discography,
    FileUrl,
    Group,
    Source,
    Transcription,
    History,
    Notes,
    WordsAfterTune,
    /// Known field whose content is dropped (I, m, P, Q, r, ...)
    Discarded,
}

impl HeaderField {
    /// Look up the field for a header letter
    pub fn from_letter(letter: char) -> Option<Self> {
        let field = match letter {
            'X' => HeaderField::Sequence,
            'M' => HeaderField::Meter,
            'L' => HeaderField::NoteLength,
            'K' => HeaderField::Key,
            'T' => HeaderField::Title,
            'C' => HeaderField::Composer,
            'R' => HeaderField::Rhythm,
            'O' => HeaderField::Origin,
            'A' => HeaderField::Area,
            'B' => HeaderField::Book,
            'D' => HeaderField::Discography,
            'F' => HeaderField::FileUrl,
            'G' => HeaderField::Group,
            'S' => HeaderField::Source,
            'Z' => HeaderField::Transcription,
            'H' => HeaderField::History,
            'N' => HeaderField::Notes,
            'W' => HeaderField::WordsAfterTune,
            // Elemskip, instruction, macro, parts, tempo, remark, symbol line,
            // user defined, voice, lyrics and field continuation
            'E' | 'I' | 'm' | 'P' | 'Q' | 'r' | 's' | 'U' | 'V' | 'w' | '+' => {
                HeaderField::Discarded
            }
            _ => return None,
        };
        Some(field)
    }
}

/// Check if a character can open a header line
pub fn is_field_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '+'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_letters() {
        assert_eq!(HeaderField::from_letter('X'), Some(HeaderField::Sequence));
        assert_eq!(HeaderField::from_letter('W'), Some(HeaderField::WordsAfterTune));
        assert_eq!(HeaderField::from_letter('r'), Some(HeaderField::Discarded));
        assert_eq!(HeaderField::from_letter('+'), Some(HeaderField::Discarded));
    }

    #[test]
    fn test_unknown_letters() {
        assert_eq!(HeaderField::from_letter('Y'), None);
        assert_eq!(HeaderField::from_letter('x'), None);
        assert_eq!(HeaderField::from_letter('|'), None);
    }

    #[test]
    fn test_field_letters() {
        assert!(is_field_letter('T'));
        assert!(is_field_letter('+'));
        assert!(!is_field_letter('|'));
        assert!(!is_field_letter(':'));
    }
}
