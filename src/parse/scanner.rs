//! Character-level scanner for ABC text
//!
//! The scanner is an explicit state machine pulled one token at a time.
//! Header lines (`Letter:value`) and body lines (notes, barlines, chords)
//! follow different lexical rules; the mode is chosen at the start of
//! every physical line.
//!
//! ## States
//! - Line: decide header or body for the line that starts here
//! - Header*: field name, then the value lexed according to the field
//! - EndOfField: trailing blanks and the newline after a header value
//! - Body: notes, rests, barlines, accidentals and friends
//! - Comment: text after `%` up to the end of the line
//! - Chord: a quoted chord symbol or annotation
//! - Variant: `[1,3` / `[1-2` variant ending markers
//!
//! A scan error produces a single error token and stops the scanner; no
//! end-of-input token follows it.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::parse::fields::{is_field_letter, HeaderField};
use crate::parse::tokens::{Token, TokenKind};

/// Multi-character barlines, checked before single characters.
/// Entries sharing a first character are ordered longest first.
const COMPOUND_BARLINES: [(&str, TokenKind); 9] = [
    ("|]", TokenKind::ThinThickDoubleBarline),
    ("||", TokenKind::ThinThinDoubleBarline),
    ("[|", TokenKind::ThickThinDoubleBarline),
    ("|:", TokenKind::StartRepeat),
    (":||:", TokenKind::StartEndRepeats),
    (":|:", TokenKind::StartEndRepeats),
    ("::", TokenKind::StartEndRepeats),
    (":|", TokenKind::EndRepeat),
    (".|", TokenKind::DottedBarline),
];

/// Annotation placement characters allowed right after the opening quote
const ANNOTATION_POSITIONS: [char; 5] = ['^', '_', '<', '>', '@'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Line,
    Header,
    HeaderNumber,
    HeaderString,
    HeaderMeter,
    HeaderNoteLength,
    EndOfField,
    Body,
    Comment,
    Chord,
    Variant,
    Done,
}

/// Pull-based scanner over a complete ABC input
pub struct Scanner<'a> {
    /// Name of the input, used in error messages
    name: String,
    input: &'a str,
    /// Current byte position
    pos: usize,
    /// Start of the token being accumulated
    start: usize,
    /// Line number at `start`
    start_line: usize,
    /// Width of the last character read, for a single `backup`
    width: usize,
    /// 1 + number of newlines consumed
    line: usize,
    state: ScanState,
    pending: VecDeque<Token>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over the whole input text
    pub fn new(input: &'a str) -> Self {
        Self::with_name("input", input)
    }

    /// Create a scanner that names the input in its error messages
    pub fn with_name(name: impl Into<String>, input: &'a str) -> Self {
        Self {
            name: name.into(),
            input,
            pos: 0,
            start: 0,
            start_line: 1,
            width: 0,
            line: 1,
            state: ScanState::Line,
            pending: VecDeque::new(),
        }
    }

    /// Stop scanning; no further tokens are produced
    pub fn drain(&mut self) {
        self.pending.clear();
        self.state = ScanState::Done;
    }

    // ------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------

    /// Read the next character, `None` past the end of input
    fn next_char(&mut self) -> Option<char> {
        match self.input[self.pos..].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                if c == '\n' {
                    self.line += 1;
                }
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Step back over the last character read. Only valid once per `next_char`.
    fn backup(&mut self) {
        self.pos -= self.width;
        if self.width == 1 && self.input.as_bytes()[self.pos] == b'\n' {
            self.line -= 1;
        }
        self.width = 0;
    }

    /// Consume a run of characters accepted by `valid`
    fn accept_run(&mut self, valid: impl Fn(char) -> bool) {
        while let Some(c) = self.next_char() {
            if !valid(c) {
                self.backup();
                break;
            }
        }
    }

    fn accept_digits(&mut self) {
        self.accept_run(|c| c.is_ascii_digit());
    }

    /// Consume `count` characters known not to contain newlines
    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            self.next_char();
        }
    }

    /// Queue the pending span as a token
    fn emit(&mut self, kind: TokenKind) {
        let text = &self.input[self.start..self.pos];
        self.pending
            .push_back(Token::new(kind, text, self.start, self.start_line));
        self.ignore();
    }

    /// Drop the pending span without producing a token
    fn ignore(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
    }

    /// Queue an error token and stop
    fn errorf(&mut self, message: String) -> ScanState {
        let text = format!("{}:{}: {}", self.name, self.line, message);
        self.pending
            .push_back(Token::new(TokenKind::Error, text, self.start, self.line));
        ScanState::Done
    }

    fn ignore_whitespace(&mut self) {
        self.accept_run(is_space);
        self.ignore();
    }

    fn consume_to_end_of_line(&mut self) {
        self.accept_run(|c| !is_end_of_line(c));
    }

    /// Consume one line ending (`\n`, `\r\n` or `\r`)
    fn consume_newline(&mut self) -> bool {
        match self.peek() {
            Some('\r') => {
                self.next_char();
                if self.peek() == Some('\n') {
                    self.next_char();
                } else {
                    // Lone carriage return
                    self.line += 1;
                }
                true
            }
            Some('\n') => {
                self.next_char();
                true
            }
            _ => false,
        }
    }

    fn step(&mut self) -> ScanState {
        match self.state {
            ScanState::Line => self.lex_line(),
            ScanState::Header => self.lex_header(),
            ScanState::HeaderNumber => self.lex_header_number(),
            ScanState::HeaderString => self.lex_header_string(),
            ScanState::HeaderMeter => self.lex_header_meter(),
            ScanState::HeaderNoteLength => self.lex_header_note_length(),
            ScanState::EndOfField => self.lex_end_of_field(),
            ScanState::Body => self.lex_body(),
            ScanState::Comment => self.lex_comment(),
            ScanState::Chord => self.lex_chord(),
            ScanState::Variant => self.lex_variant(),
            ScanState::Done => ScanState::Done,
        }
    }

    // ------------------------------------------------------------------
    // States
    // ------------------------------------------------------------------

    fn lex_line(&mut self) -> ScanState {
        let mut chars = self.input[self.pos..].chars();
        match (chars.next(), chars.next()) {
            (None, _) => {
                self.emit(TokenKind::EndOfInput);
                ScanState::Done
            }
            (Some(c), Some(':')) if is_field_letter(c) => ScanState::Header,
            _ => ScanState::Body,
        }
    }

    fn lex_header(&mut self) -> ScanState {
        let Some(letter) = self.next_char() else {
            return ScanState::Line;
        };
        self.emit(TokenKind::FieldName);

        // Colon
        self.next_char();
        self.ignore();
        self.ignore_whitespace();

        match HeaderField::from_letter(letter) {
            Some(HeaderField::Sequence) => ScanState::HeaderNumber,
            Some(HeaderField::Meter) => ScanState::HeaderMeter,
            Some(HeaderField::NoteLength) => ScanState::HeaderNoteLength,
            _ => ScanState::HeaderString,
        }
    }

    fn lex_header_number(&mut self) -> ScanState {
        self.ignore_whitespace();
        self.accept_digits();
        self.emit(TokenKind::Number);
        ScanState::EndOfField
    }

    fn lex_header_string(&mut self) -> ScanState {
        self.ignore_whitespace();
        self.consume_to_end_of_line();
        self.emit(TokenKind::String);
        ScanState::EndOfField
    }

    fn lex_header_meter(&mut self) -> ScanState {
        // C, C| and none are written as words
        if self.peek().map_or(false, char::is_alphabetic) {
            return ScanState::HeaderString;
        }

        while let Some(c) = self.next_char() {
            match c {
                c if is_end_of_line(c) => {
                    self.backup();
                    break;
                }
                '0'..='9' => {
                    self.accept_digits();
                    self.emit(TokenKind::Number);
                }
                '(' => self.emit(TokenKind::OpenParen),
                ')' => self.emit(TokenKind::CloseParen),
                '+' => self.emit(TokenKind::Plus),
                '/' => self.emit(TokenKind::Divide),
                c if is_space(c) => self.ignore(),
                c => return self.errorf(format!("unexpected character {:?} in meter", c)),
            }
        }
        ScanState::EndOfField
    }

    fn lex_header_note_length(&mut self) -> ScanState {
        while let Some(c) = self.next_char() {
            match c {
                c if is_end_of_line(c) => {
                    self.backup();
                    break;
                }
                // Older tunes spell the length out as a word
                c if c.is_alphabetic() => {
                    self.backup();
                    return ScanState::HeaderString;
                }
                '0'..='9' => {
                    self.accept_digits();
                    self.emit(TokenKind::Number);
                }
                '/' => self.emit(TokenKind::Divide),
                c if is_space(c) => self.ignore(),
                c => return self.errorf(format!("unknown character {:?} in note length", c)),
            }
        }
        ScanState::EndOfField
    }

    fn lex_end_of_field(&mut self) -> ScanState {
        self.ignore_whitespace();
        match self.peek() {
            None => ScanState::Line,
            Some(c) if is_end_of_line(c) => {
                self.consume_newline();
                self.emit(TokenKind::Newline);
                ScanState::Line
            }
            Some(c) => self.errorf(format!("expected newline, found {:?}", c)),
        }
    }

    fn lex_body(&mut self) -> ScanState {
        let Some(c) = self.peek() else {
            return ScanState::Line;
        };

        if is_end_of_line(c) {
            self.consume_newline();
            self.emit(TokenKind::Newline);
            return ScanState::Line;
        }

        if c.is_ascii_digit() {
            self.accept_digits();
            self.emit(TokenKind::Number);
            return ScanState::Body;
        }

        if let Some((kind, len)) = compound_barline(&self.input[self.pos..]) {
            self.advance(len);
            self.emit(kind);
            return ScanState::Body;
        }

        self.next_char();
        match c {
            '%' => {
                self.emit(TokenKind::Percent);
                return ScanState::Comment;
            }
            c if is_space(c) => self.emit(TokenKind::Space),
            'x' => self.emit(TokenKind::InvisibleRest),
            'z' => self.emit(TokenKind::Rest),
            'Z' => self.emit(TokenKind::MultiMeasureRest),
            c if c.is_alphabetic() => self.emit(TokenKind::Letter),
            '^' => self.emit(TokenKind::Sharp),
            '=' => self.emit(TokenKind::Natural),
            '_' => self.emit(TokenKind::Flat),
            '/' => self.emit(TokenKind::Divide),
            '\\' => {
                self.ignore();
                return self.lex_line_continuation();
            }
            '"' => {
                self.ignore();
                return ScanState::Chord;
            }
            '|' => self.emit(TokenKind::Barline),
            '+' => self.emit(TokenKind::Plus),
            '<' => self.emit(TokenKind::LessThan),
            '>' => self.emit(TokenKind::GreaterThan),
            '-' => self.emit(TokenKind::Minus),
            '[' => {
                if !self.peek().map_or(false, |c| c.is_ascii_digit()) {
                    return self.errorf(String::from("unexpected character after '['"));
                }
                self.ignore();
                return ScanState::Variant;
            }
            ':' => self.emit(TokenKind::Colon),
            c => return self.errorf(format!("unknown character {:?}", c)),
        }
        ScanState::Body
    }

    /// A backslash joins the next physical line onto this one
    fn lex_line_continuation(&mut self) -> ScanState {
        match self.peek() {
            None => ScanState::Body,
            Some(c) if is_end_of_line(c) => {
                self.consume_newline();
                self.ignore();
                ScanState::Body
            }
            Some(c) => self.errorf(format!("expected newline after '\\', found {:?}", c)),
        }
    }

    fn lex_comment(&mut self) -> ScanState {
        self.consume_to_end_of_line();
        self.emit(TokenKind::Comment);
        if self.consume_newline() {
            self.emit(TokenKind::Newline);
        }
        ScanState::Line
    }

    fn lex_chord(&mut self) -> ScanState {
        if self.peek().map_or(false, |c| ANNOTATION_POSITIONS.contains(&c)) {
            self.next_char();
            self.emit(TokenKind::AnnotationPosition);
            return self.lex_quoted(TokenKind::Annotation);
        }
        self.lex_quoted(TokenKind::Chord)
    }

    /// Consume up to the closing quote, which is dropped
    fn lex_quoted(&mut self, kind: TokenKind) -> ScanState {
        self.accept_run(|c| c != '"' && !is_end_of_line(c));
        if self.peek() != Some('"') {
            return self.errorf(format!("unterminated {}", kind));
        }
        self.emit(kind);
        self.next_char();
        self.ignore();
        ScanState::Body
    }

    fn lex_variant(&mut self) -> ScanState {
        self.accept_digits();
        self.emit(TokenKind::VariantNumber);

        let separator = match self.peek() {
            Some(',') => TokenKind::VariantComma,
            Some('-') => TokenKind::VariantRange,
            _ => return ScanState::Body,
        };
        self.next_char();
        self.emit(separator);

        let found = match self.peek() {
            Some(c) if c.is_ascii_digit() => return ScanState::Variant,
            Some(c) => format!("{:?}", c),
            None => String::from("end of input"),
        };
        self.errorf(format!("expected digit in variant ending, found {}", found))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.state == ScanState::Done {
                return None;
            }
            self.state = self.step();
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Match a multi-character barline at the start of `rest`
fn compound_barline(rest: &str) -> Option<(TokenKind, usize)> {
    COMPOUND_BARLINES
        .iter()
        .find(|(marker, _)| rest.starts_with(*marker))
        .map(|(marker, kind)| (*kind, marker.chars().count()))
}

/// Blank characters inside a line
fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_end_of_line(c: char) -> bool {
    c == '\r' || c == '\n'
}
