use crate::ast::{Song, Token};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Chromatic scale starting on A, spelled with sharps
const SHARP_SCALE: [&str; 12] = ["A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#"];

/// Chromatic scale starting on A, spelled with flats
const FLAT_SCALE: [&str; 12] = ["A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab"];

/// Pieces of a chord symbol that are never a root. Longer names come first so
/// `maj` isn't split at its `m`.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"maj|sus|dim|aug|add|/| |\d|m|M").unwrap());

/// Which spelling to use for the five black keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Sharp,
    Flat,
}

impl Accidental {
    fn scale(self) -> &'static [&'static str; 12] {
        match self {
            Accidental::Sharp => &SHARP_SCALE,
            Accidental::Flat => &FLAT_SCALE,
        }
    }
}

/// Lookup from every pitch-class name to its transposed name.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordMap {
    halfsteps: u8,
    preference: Accidental,
    lookup: HashMap<&'static str, &'static str>,
}

impl ChordMap {
    /// Build a map transposing up by `halfsteps` (negative moves down).
    /// The amount is reduced mod 12.
    pub fn new(halfsteps: i32, preference: Accidental) -> Self {
        let halfsteps = halfsteps.rem_euclid(12) as usize;
        let target = preference.scale();

        let mut lookup = HashMap::with_capacity(24);
        for index in 0..12 {
            let transposed = target[(index + halfsteps) % 12];
            // either spelling is accepted, the preferred one is written
            lookup.insert(SHARP_SCALE[index], transposed);
            lookup.insert(FLAT_SCALE[index], transposed);
        }

        Self {
            halfsteps: halfsteps as u8,
            preference,
            lookup,
        }
    }

    pub fn halfsteps(&self) -> u8 {
        self.halfsteps
    }

    pub fn preference(&self) -> Accidental {
        self.preference
    }

    /// The transposed name of a single pitch class, if `note` is one.
    pub fn get(&self, note: &str) -> Option<&'static str> {
        self.lookup.get(note).copied()
    }

    /// Transpose every root in a chord symbol or chord line.
    ///
    /// Only the note names move; qualities, extensions, slashes and spacing
    /// are kept as written.
    ///
    /// # Example
    /// ```
    /// use chordtex::{Accidental, ChordMap};
    ///
    /// let up_two = ChordMap::new(2, Accidental::Sharp);
    /// assert_eq!(up_two.transpose("D/F#"), "E/G#");
    /// assert_eq!(up_two.transpose("Gsus4"), "Asus4");
    /// ```
    pub fn transpose(&self, chord: &str) -> String {
        let mut result = String::with_capacity(chord.len() + 2);
        let mut last = 0;
        for separator in SEPARATORS.find_iter(chord) {
            self.push_piece(&mut result, &chord[last..separator.start()]);
            result.push_str(separator.as_str());
            last = separator.end();
        }
        self.push_piece(&mut result, &chord[last..]);
        result
    }

    fn push_piece(&self, result: &mut String, piece: &str) {
        match self.get(piece) {
            Some(transposed) => result.push_str(transposed),
            None => result.push_str(piece),
        }
    }
}

/// Rewrite every chord and chord line of `song` in place.
pub fn transpose_song(song: &mut Song, map: &ChordMap) {
    log::debug!("transposing by {} half-steps ({:?})", map.halfsteps(), map.preference());
    for token in song
        .stanzas
        .iter_mut()
        .flat_map(|stanza| stanza.lines.iter_mut())
        .flat_map(|line| line.tokens.iter_mut())
    {
        match token {
            Token::Chord(chord) | Token::Chordline(chord) => *chord = map.transpose(chord),
            Token::Text(_) | Token::Parentheses(_) | Token::Command { .. } => {}
        }
    }
}

impl Song {
    /// Transpose all chords of this song in place.
    pub fn transpose(&mut self, map: &ChordMap) {
        transpose_song(self, map);
    }
}
