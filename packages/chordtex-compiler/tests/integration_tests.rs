//! Integration tests for the chordtex compiler
//!
//! Tests the full pipeline from song source to chordsheet and slides markup.

use chordtex::{
    compile, compile_chords, compile_slides, parse, splice, to_text, transpose_source, Accidental, ChordMap,
    ChordTexError, ConvertOptions, Keyword, StanzaKey, Token,
};
use proptest::prelude::*;

#[test]
fn test_splice_praise_ye_the_lord() {
    let tokens = splice("G      D  G", "Praise ye the Lord", 1).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::text(""),
            Token::chord("G"),
            Token::text("Praise "),
            Token::chord("D"),
            Token::text("ye "),
            Token::chord("G"),
            Token::text("the Lord"),
        ]
    );
}

#[test]
fn test_compile_numbered_verse() {
    let source = "verse 1:\nG D G\nAmazing grace";

    let chords = compile_chords(source).unwrap();
    assert!(chords.starts_with("\\verse[~1]{"));
    assert_eq!(chords.matches("\\verse").count(), 1);
    assert_eq!(chords.matches("\\chord{").count(), 3);
    for chord in ["\\chord{G}", "\\chord{D}"] {
        assert!(chords.contains(chord));
    }
    let without_chords = chords
        .replace("\\chord{G}", "")
        .replace("\\chord{D}", "")
        .replace("\\verse[~1]{", "")
        .replace('}', "");
    assert_eq!(without_chords, "Amazing grace");

    let slides = compile_slides(source).unwrap();
    assert_eq!(slides, "\\verse[~1]{Amazing grace}");
}

#[test]
fn test_order_overrides_declaration() {
    let source = "verse 1:\nAmazing grace\n\nchorus:\nMy chains are gone\n\norder: chorus, verse 1\n";
    let chords = compile_chords(source).unwrap();
    let chorus = chords.find("\\chorus").unwrap();
    let verse = chords.find("\\verse[~1]").unwrap();
    assert!(chorus < verse);

    let song = parse(source).unwrap();
    assert_eq!(
        song.chords_order,
        vec![
            StanzaKey::new(Keyword::Chorus, None),
            StanzaKey::new(Keyword::Verse, Some(1)),
        ]
    );
}

#[test]
fn test_unknown_command() {
    let err = compile_chords("title: Test\nfooter: (c) 2024").unwrap_err();
    assert_eq!(
        err,
        ChordTexError::UnknownCommandError {
            line: 2,
            keyword: "footer".to_string(),
        }
    );
}

#[test]
fn test_duplicate_chorus() {
    let err = compile_slides("chorus:\nHallelujah\n\nverse:\nAmazing grace\n\nchorus:\nHosanna").unwrap_err();
    assert!(matches!(err, ChordTexError::DuplicateCommandError { line: 7, .. }));
    assert_eq!(err.line(), Some(7));
}

#[test]
fn test_full_song() {
    let source = r"title: Come & Worship
by: Anonymous
capo: 3

intro:
G   C   D

verse 1:
G         C      D
Come, now is the time (x2)

chorus:
G       D/F#     Em
Worship the King of kings
";
    let compiled = compile(source, &ConvertOptions::default()).unwrap();

    assert_eq!(
        compiled.chords,
        "\\songtitle{Come \\& Worship}\n\
         \\by{Anonymous}\n\
         \\capo{3}\n\
         \\intro{\\chordline{G\\hspace{3mm}C\\hspace{3mm}D}}\n\
         \\verse[~1]{\\chord{G}Come, now \\chord{C}is the \\chord{D}time \\emph{(x2)}}\n\
         \\chorus{\\chord{G}Worship \\chord{D/F\\#}the King \\chord{Em}of kings}"
    );
    assert_eq!(
        compiled.slides,
        "\\songtitle{Come \\& Worship}\n\
         \\by{Anonymous}\n\
         \\verse[~1]{Come, now is the time}\n\
         \\chorus{Worship the King of kings}"
    );
}

#[test]
fn test_transpose_source() {
    let up = transpose_source("verse:\nG  C  D\nPraise Him now", 2, Accidental::Sharp).unwrap();
    assert_eq!(up, "verse:\nA  D  E\nPraise Him now\n");
    let back = transpose_source(&up, -2, Accidental::Sharp).unwrap();
    assert_eq!(back, "verse:\nG  C  D\nPraise Him now\n");
}

#[test]
fn test_round_trip_is_idempotent() {
    let source = "title: Song\norder: chorus, verse 2\nverse 2:\n  Am   F\nWere the whole realm\nchorus:\nG/B  C\n";
    let once = to_text(&parse(source).unwrap());
    let twice = to_text(&parse(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn test_all_library_songs_compile() {
    let songs = chordtex_songs::get_all_songs();
    assert!(!songs.is_empty());
    for song in songs {
        let compiled = compile(&song.content, &ConvertOptions::default())
            .unwrap_or_else(|e| panic!("{} failed to compile: {}", song.name, e));
        assert!(compiled.chords.contains("\\songtitle{"), "{} has no title", song.name);
        assert!(compiled.chords.contains("\\chord{"), "{} has no chords", song.name);
        assert!(!compiled.slides.contains("\\chord"), "{} slides contain chords", song.name);
    }
}

#[test]
fn test_all_library_songs_round_trip() {
    for song in chordtex_songs::get_all_songs() {
        let once = to_text(&parse(&song.content).unwrap());
        let twice = to_text(&parse(&once).unwrap());
        assert_eq!(once, twice, "{} is not stable", song.name);
    }
}

#[test]
fn test_library_songs_survive_transposition() {
    for song in chordtex_songs::get_all_songs() {
        for halfsteps in [-5, 1, 6, 11] {
            let transposed = transpose_source(&song.content, halfsteps, Accidental::Flat)
                .unwrap_or_else(|e| panic!("{} at {}: {}", song.name, halfsteps, e));
            assert!(parse(&transposed).is_ok(), "{} at {} no longer parses", song.name, halfsteps);
        }
    }
}

const SHARP_ROOTS: [&str; 12] = ["A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#"];
const FLAT_ROOTS: [&str; 12] = ["A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab"];
const QUALITIES: [&str; 9] = ["", "m", "7", "m7", "maj7", "sus4", "dim", "add9", "M7"];
const SYMBOLS: [&str; 8] = ["G", "D", "Am", "C#m", "Bb", "F/A", "Gsus4", "Dmaj7"];

fn chord_in(roots: &'static [&'static str; 12]) -> impl Strategy<Value = String> {
    (0..12usize, 0..QUALITIES.len(), proptest::option::of(0..12usize)).prop_map(move |(root, quality, bass)| {
        let mut chord = format!("{}{}", roots[root], QUALITIES[quality]);
        if let Some(bass) = bass {
            chord.push('/');
            chord.push_str(roots[bass]);
        }
        chord
    })
}

fn chord_line() -> impl Strategy<Value = String> {
    (0..6usize, proptest::collection::vec((1..6usize, 0..SYMBOLS.len()), 1..6)).prop_map(|(lead, chords)| {
        let mut line = " ".repeat(lead);
        for (i, (gap, symbol)) in chords.into_iter().enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(gap));
            }
            line.push_str(SYMBOLS[symbol]);
        }
        line
    })
}

proptest! {
    #[test]
    fn prop_splice_keeps_padded_lyrics(chords in chord_line(), lyrics in "[a-zA-Z ,']{0,40}") {
        let tokens = splice(&chords, &lyrics, 1).unwrap();
        let text: String = tokens
            .iter()
            .filter_map(|token| match token {
                Token::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let width = chords.chars().count().max(lyrics.chars().count());
        prop_assert_eq!(text, format!("{:<width$}", lyrics, width = width));
    }

    #[test]
    fn prop_transpose_there_and_back_sharps(chord in chord_in(&SHARP_ROOTS), n in -24i32..24) {
        let there = ChordMap::new(n, Accidental::Sharp).transpose(&chord);
        let back = ChordMap::new(-n, Accidental::Sharp).transpose(&there);
        prop_assert_eq!(back, chord);
    }

    #[test]
    fn prop_transpose_there_and_back_flats(chord in chord_in(&FLAT_ROOTS), n in -24i32..24) {
        let there = ChordMap::new(n, Accidental::Flat).transpose(&chord);
        let back = ChordMap::new(-n, Accidental::Flat).transpose(&there);
        prop_assert_eq!(back, chord);
    }

    #[test]
    fn prop_octave_is_identity(chord in chord_in(&SHARP_ROOTS)) {
        prop_assert_eq!(ChordMap::new(12, Accidental::Sharp).transpose(&chord), chord);
    }
}
