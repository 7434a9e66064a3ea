// End-to-end tests: ABC text to tune records

use abc_notation::{
    parse_str, parse_str_with, AbcError, Key, Meter, NoteLength, ParseError, ParseSettings, Tune,
    UnknownFieldPolicy,
};

fn parse_error(input: &str) -> ParseError {
    match parse_str(input) {
        Err(AbcError::Parse(err)) => err,
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_str("").unwrap(), Vec::<Tune>::new());
}

#[test]
fn test_comment_only_input() {
    assert!(parse_str("%abc-2.1\n").unwrap().is_empty());
}

#[test]
fn test_basic_tune() {
    let tunes = parse_str("X:1\nM:4/4\nO:Irish\nR:Reel").unwrap();

    let mut expected = Tune::new(1);
    expected.meter = Meter::new(vec![4], 4);
    expected.origin = "Irish".to_string();
    expected.rhythm = "Reel".to_string();

    assert_eq!(tunes, vec![expected]);
}

#[test]
fn test_additive_meter() {
    let tunes = parse_str("X:1\nM:4+2/4\nK:G\n").unwrap();
    assert_eq!(tunes[0].meter.numerator, vec![4, 2]);
    assert_eq!(tunes[0].meter.denominator, 4);
}

#[test]
fn test_meter_none_and_empty_meter() {
    let tunes = parse_str("X:1\nM:6/8\nM:none\nX:2\nM:6/8\nM:\nK:G\n").unwrap();
    assert_eq!(tunes[0].meter, Meter::default());
    assert_eq!(tunes[1].meter, Meter::default());
    assert_eq!(tunes[1].key.as_str(), "G");
}

#[test]
fn test_oversized_meter_parses_without_bar_length() {
    let tunes = parse_str("X:1\nM:4294967295+1/4\n").unwrap();
    assert_eq!(tunes[0].meter.numerator, vec![u32::MAX, 1]);
    assert_eq!(tunes[0].meter.beats(), None);
    assert_eq!(tunes[0].meter.bar_length(), None);
}

#[test]
fn test_full_header() {
    let abc = "\
%abc-2.1
X:42
T:The Silver Spear
C:Trad.
O:Ireland
R:reel
A:Connacht
B:O'Neill's 1001
D:Chieftains 4
F:http://example.com/silverspear.abc
G:fiddle
H:Collected in 1903.
H:Also played as a hornpipe.
N:Second part is often doubled.
S:Session notes
Z:transcribed by hand
M:C|
L:1/8
Q:1/2=100
K:D
W:Words after the tune
W:Second verse
";
    let tunes = parse_str(abc).unwrap();
    assert_eq!(tunes.len(), 1);

    let tune = &tunes[0];
    assert_eq!(tune.sequence(), 42);
    assert_eq!(tune.title, "The Silver Spear");
    assert_eq!(tune.composer, "Trad.");
    assert_eq!(tune.origin, "Ireland");
    assert_eq!(tune.rhythm, "reel");
    assert_eq!(tune.area, "Connacht");
    assert_eq!(tune.book, "O'Neill's 1001");
    assert_eq!(tune.discography, "Chieftains 4");
    assert_eq!(tune.file_url, "http://example.com/silverspear.abc");
    assert_eq!(tune.group, "fiddle");
    assert_eq!(tune.history, vec!["Collected in 1903.", "Also played as a hornpipe."]);
    assert_eq!(tune.comments, vec!["Second part is often doubled."]);
    assert_eq!(tune.source, "Session notes");
    assert_eq!(tune.transcription, "transcribed by hand");
    assert_eq!(tune.meter, Meter::cut_time());
    assert_eq!(tune.note_length, NoteLength::new(1, 8));
    assert_eq!(tune.key, Key("D".to_string()));
    assert_eq!(tune.words_after_tune, vec!["Words after the tune", "Second verse"]);
}

#[test]
fn test_tune_book_with_bodies() {
    let abc = "\
X:1
T:Kesh, The
M:6/8
L:1/8
K:G
|:GAG GAB|ABA ABd|edd gdd|edB dBA:|
\"G\"GAG \"D\"FGA|\"^fine\"G3 G2|]

X:2
T:Morrison's
R:jig
M:6/8
K:Edor
|:E3 B3|EBE AFD|[1 DED c3:|[2 DED dBA||
";
    let tunes = parse_str(abc).unwrap();
    assert_eq!(tunes.len(), 2);

    assert_eq!(tunes[0].sequence(), 1);
    assert_eq!(tunes[0].title, "Kesh, The");
    assert_eq!(tunes[0].key.as_str(), "G");
    assert!(tunes[0].bars.is_empty());

    assert_eq!(tunes[1].sequence(), 2);
    assert_eq!(tunes[1].title, "Morrison's");
    assert_eq!(tunes[1].rhythm, "jig");
    assert_eq!(tunes[1].meter, Meter::new(vec![6], 8));
    assert_eq!(tunes[1].key.as_str(), "Edor");
}

#[test]
fn test_fields_do_not_leak_between_tunes() {
    let tunes = parse_str("X:1\nT:First\nN:note\nX:2\nK:A\n").unwrap();
    assert_eq!(tunes[1].title, "");
    assert!(tunes[1].comments.is_empty());
    assert_eq!(tunes[1].key.as_str(), "A");
}

#[test]
fn test_line_continuation_in_body() {
    let tunes = parse_str("X:1\nK:G\neg|a21ab\\\nageg|\n").unwrap();
    assert_eq!(tunes.len(), 1);
}

#[test]
fn test_unknown_field_letter_fails() {
    let err = parse_error("X:1\nY:mystery\nK:G\n");
    assert_eq!(err, ParseError::UnhandledField { field: "Y".to_string(), line: 2 });
}

#[test]
fn test_unknown_field_letter_discarded_when_configured() {
    let settings = ParseSettings::default().with_unknown_fields(UnknownFieldPolicy::Discard);
    let tunes = parse_str_with("X:1\nY:mystery\nT:Kept\n", &settings).unwrap();
    assert_eq!(tunes[0].title, "Kept");
}

#[test]
fn test_tolerated_fields() {
    let abc = "\
X:1
I:abc-charset utf-8
m:~g2 = {a}g{f}g
P:AABB
Q:1/4=120
r:remark
U:T = !trill!
V:1
K:G
";
    let tunes = parse_str(abc).unwrap();
    assert_eq!(tunes[0].key.as_str(), "G");
}

#[test]
fn test_missing_sequence_number() {
    let err = parse_error("X:\nT:No number\n");
    assert!(matches!(err, ParseError::InvalidNumber { line: 1, .. }));
}

#[test]
fn test_bad_meter() {
    let err = parse_error("X:1\nM:4\n");
    assert!(matches!(err, ParseError::UnexpectedToken { line: 2, .. }));

    let err = parse_error("X:1\nM:3/4*\n");
    assert!(matches!(err, ParseError::Scan(_)));
}

#[test]
fn test_scan_error_aborts_parse() {
    let err = parse_error("X:1\nT:Fine\nK:G\nab}c|\n");
    match err {
        ParseError::Scan(scan) => {
            assert_eq!(scan.line, 4);
            assert!(scan.message.contains("unknown character"));
        }
        other => panic!("expected a scan error, got {:?}", other),
    }
}

#[test]
fn test_source_name_in_scan_errors() {
    let settings = ParseSettings::default().with_source_name("reels.abc");
    let err = parse_str_with("X:1\n{g}A\n", &settings).unwrap_err();
    assert_eq!(err.to_string(), "scan error: reels.abc:2: unknown character '{'");
}
