//! Structural parser for ABC token streams
//!
//! Consumes tokens strictly in order and assembles tune records from the
//! header fields. The tune being built is held by the parser itself and is
//! flushed into the output when the next `X:` field arrives or the input
//! ends. Body tokens are scanned but not assembled into bars.
//!
//! Each header field is handled by a short straight-line sequence of
//! `expect` calls that also consumes the newline ending the field.

use std::vec;

use crate::models::{Key, Meter, NoteLength, Tune};
use crate::parse::errors::{ParseError, ScanError};
use crate::parse::fields::HeaderField;
use crate::parse::scanner::Scanner;
use crate::parse::settings::{ParseSettings, UnknownFieldPolicy};
use crate::parse::tokens::{Token, TokenKind};

/// Tokens that may open a meter field
const METER_START: [TokenKind; 8] = [
    TokenKind::Number,
    TokenKind::Plus,
    TokenKind::OpenParen,
    TokenKind::CloseParen,
    TokenKind::Divide,
    TokenKind::String,
    TokenKind::Newline,
    TokenKind::EndOfInput,
];

/// Tokens allowed in a meter numerator
const METER_NUMERATOR: [TokenKind; 5] = [
    TokenKind::Number,
    TokenKind::Plus,
    TokenKind::OpenParen,
    TokenKind::CloseParen,
    TokenKind::Divide,
];

const END_OF_FIELD: [TokenKind; 2] = [TokenKind::Newline, TokenKind::EndOfInput];

/// Ordered supply of tokens for the parser
pub trait TokenSource {
    /// Next token, `None` once the source is exhausted
    fn next_token(&mut self) -> Option<Token>;

    /// Abandon the remaining tokens
    fn drain(&mut self);
}

impl TokenSource for Scanner<'_> {
    fn next_token(&mut self) -> Option<Token> {
        self.next()
    }

    fn drain(&mut self) {
        Scanner::drain(self)
    }
}

impl TokenSource for vec::IntoIter<Token> {
    fn next_token(&mut self) -> Option<Token> {
        self.next()
    }

    fn drain(&mut self) {
        self.by_ref().for_each(drop);
    }
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Option<Token> {
        (**self).next_token()
    }

    fn drain(&mut self) {
        (**self).drain()
    }
}

/// Builds tunes from a token source
pub struct Parser<S> {
    tokens: S,
    settings: ParseSettings,
    tunes: Vec<Tune>,
    /// Tune receiving header fields until the next X:
    current: Option<Tune>,
    /// Line of the last token taken
    line: usize,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(tokens: S) -> Self {
        Self::with_settings(tokens, ParseSettings::default())
    }

    pub fn with_settings(tokens: S, settings: ParseSettings) -> Self {
        Self {
            tokens,
            settings,
            tunes: Vec::new(),
            current: None,
            line: 1,
        }
    }

    /// Parse every tune in the token stream
    pub fn parse(mut self) -> Result<Vec<Tune>, ParseError> {
        if let Err(err) = self.parse_tokens() {
            self.tokens.drain();
            return Err(err);
        }
        if let Some(tune) = self.current.take() {
            self.finish_tune(tune);
        }
        log::debug!("parsed {} tunes", self.tunes.len());
        Ok(self.tunes)
    }

    fn parse_tokens(&mut self) -> Result<(), ParseError> {
        while let Some(token) = self.next_token()? {
            if token.is(TokenKind::FieldName) {
                self.handle_field_name(&token)?;
            }
        }
        Ok(())
    }

    /// Take the next token; an error token aborts the parse
    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        match self.tokens.next_token() {
            Some(token) if token.is(TokenKind::Error) => Err(ScanError::from(&token).into()),
            Some(token) => {
                self.line = token.line;
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }

    fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
        match self.next_token()? {
            Some(token) if kinds.contains(&token.kind) => Ok(token),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: kinds.to_vec(),
                found: token.to_string(),
                line: token.line,
            }),
            None => Err(ParseError::UnexpectedToken {
                expected: kinds.to_vec(),
                found: String::from("nothing"),
                line: self.line,
            }),
        }
    }

    /// The newline ending a field; the last line of the input may have none
    fn expect_end_of_field(&mut self) -> Result<(), ParseError> {
        match self.next_token()? {
            None => Ok(()),
            Some(token) if END_OF_FIELD.contains(&token.kind) => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: END_OF_FIELD.to_vec(),
                found: token.to_string(),
                line: token.line,
            }),
        }
    }

    /// Skip everything through the next newline
    fn consume_to_newline(&mut self) -> Result<(), ParseError> {
        while let Some(token) = self.next_token()? {
            if END_OF_FIELD.contains(&token.kind) {
                break;
            }
        }
        Ok(())
    }

    fn handle_field_name(&mut self, token: &Token) -> Result<(), ParseError> {
        let field = token.text.chars().next().and_then(HeaderField::from_letter);
        let field = match (field, self.settings.unknown_fields) {
            (Some(field), _) => field,
            (None, UnknownFieldPolicy::Discard) => HeaderField::Discarded,
            (None, UnknownFieldPolicy::Reject) => {
                return Err(ParseError::UnhandledField {
                    field: token.text.clone(),
                    line: token.line,
                })
            }
        };
        log::trace!("line {}: {}: field", token.line, token.text);

        match field {
            HeaderField::Sequence => return self.start_tune(),
            HeaderField::Discarded => {
                log::debug!("line {}: discarding {}: field", token.line, token.text);
                return self.consume_to_newline();
            }
            _ => {}
        }

        if self.current.is_none() {
            log::debug!(
                "line {}: {}: field before the first X: field, skipping",
                token.line,
                token.text
            );
            return self.consume_to_newline();
        }

        match field {
            HeaderField::Meter => {
                let meter = self.parse_meter()?;
                self.with_tune(|tune| tune.meter = meter);
            }
            HeaderField::NoteLength => {
                if let Some(note_length) = self.parse_note_length()? {
                    self.with_tune(|tune| tune.note_length = note_length);
                }
            }
            _ => {
                let value = self.parse_string_field()?;
                self.with_tune(|tune| store_text(tune, field, value));
            }
        }
        Ok(())
    }

    fn with_tune(&mut self, update: impl FnOnce(&mut Tune)) {
        if let Some(tune) = self.current.as_mut() {
            update(tune);
        }
    }

    fn finish_tune(&mut self, tune: Tune) {
        log::debug!("finished tune X:{} {:?}", tune.sequence(), tune.title);
        self.tunes.push(tune);
    }

    /// X: flushes the tune in progress and starts a new one
    fn start_tune(&mut self) -> Result<(), ParseError> {
        let token = self.expect(&[TokenKind::Number])?;
        let sequence = parse_number(&token)?;
        if let Some(tune) = self.current.take() {
            self.finish_tune(tune);
        }
        self.current = Some(Tune::new(sequence));
        self.expect_end_of_field()
    }

    fn parse_string_field(&mut self) -> Result<String, ParseError> {
        let token = self.expect(&[TokenKind::String])?;
        self.expect_end_of_field()?;
        Ok(token.text)
    }

    fn parse_meter(&mut self) -> Result<Meter, ParseError> {
        let mut token = self.expect(&METER_START)?;
        match token.kind {
            TokenKind::Newline | TokenKind::EndOfInput => return Ok(Meter::default()),
            TokenKind::String => {
                let meter = meter_from_word(&token)?;
                self.expect_end_of_field()?;
                return Ok(meter);
            }
            _ => {}
        }

        // Plus and parens only separate numerator groups
        let mut numerator = Vec::new();
        while !token.is(TokenKind::Divide) {
            if token.is(TokenKind::Number) {
                numerator.push(parse_number(&token)?);
            }
            token = self.expect(&METER_NUMERATOR)?;
        }

        let denominator = self.expect(&[TokenKind::Number])?;
        let denominator = parse_number(&denominator)?;
        self.consume_to_newline()?;
        Ok(Meter::new(numerator, denominator))
    }

    /// `None` when the length is written as a word
    fn parse_note_length(&mut self) -> Result<Option<NoteLength>, ParseError> {
        let token = self.expect(&[TokenKind::Number, TokenKind::String])?;
        if token.is(TokenKind::String) {
            log::debug!("line {}: ignoring note length {:?}", token.line, token.text);
            self.expect_end_of_field()?;
            return Ok(None);
        }

        let numerator = parse_number(&token)?;
        self.expect(&[TokenKind::Divide])?;
        let denominator = self.expect(&[TokenKind::Number])?;
        let denominator = parse_number(&denominator)?;
        self.consume_to_newline()?;
        Ok(Some(NoteLength::new(numerator, denominator)))
    }
}

fn parse_number(token: &Token) -> Result<u32, ParseError> {
    token
        .text
        .parse::<u32>()
        .map_err(|source| ParseError::InvalidNumber {
            text: token.text.clone(),
            line: token.line,
            source,
        })
}

fn meter_from_word(token: &Token) -> Result<Meter, ParseError> {
    match token.text.trim_end() {
        "C" => Ok(Meter::common_time()),
        "C|" => Ok(Meter::cut_time()),
        word if word.eq_ignore_ascii_case("none") => Ok(Meter::default()),
        _ => Err(ParseError::UnsupportedMeter {
            text: token.text.clone(),
            line: token.line,
        }),
    }
}

/// Assign a free-text field; list fields append
fn store_text(tune: &mut Tune, field: HeaderField, value: String) {
    match field {
        HeaderField::Title => tune.title = value,
        HeaderField::Composer => tune.composer = value,
        HeaderField::Rhythm => tune.rhythm = value,
        HeaderField::Origin => tune.origin = value,
        HeaderField::Key => tune.key = Key(value),
        HeaderField::Area => tune.area = value,
        HeaderField::Book => tune.book = value,
        HeaderField::Discography => tune.discography = value,
        HeaderField::FileUrl => tune.file_url = value,
        HeaderField::Group => tune.group = value,
        HeaderField::Source => tune.source = value,
        HeaderField::Transcription => tune.transcription = value,
        HeaderField::History => tune.history.push(value),
        HeaderField::Notes => tune.comments.push(value),
        HeaderField::WordsAfterTune => tune.words_after_tune.push(value),
        HeaderField::Sequence
        | HeaderField::Meter
        | HeaderField::NoteLength
        | HeaderField::Discarded => {}
    }
}
