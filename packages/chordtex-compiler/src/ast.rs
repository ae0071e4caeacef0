//! # Abstract Syntax Tree (AST) Types
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   ├── attributes: BTreeMap<Keyword, String> (title, by, comment, capo, ...)
//!   ├── stanzas: Vec<Stanza> (declaration order)
//!   │     ├── key: StanzaKey (type + optional number)
//!   │     └── lines: Vec<Line>
//!   │           └── tokens: Vec<Token>
//!   ├── chords_order: Vec<StanzaKey>
//!   └── slides_order: Vec<StanzaKey>
//!
//! Token (enum)
//!   ├── Chord(String)       chord placed inside a lyric line
//!   ├── Chordline(String)   a chord line with no lyrics under it
//!   ├── Text(String)        lyric text
//!   ├── Parentheses(String) a "(x2)" style aside, without the parentheses
//!   └── Command { name, arg }
//! ```
//!
//! ## Key Concepts
//!
//! ### Token order
//! A line's tokens are in source left-to-right order. Later stages map or
//! filter tokens but never reorder them.
//!
//! ### Lyric reconstruction
//! Joining the `Text` tokens of a spliced line reproduces the lyric line
//! right-padded to the width of the chord line above it.
//!
//! ## Related Modules
//! - `parser` - builds a `Song` from source text
//! - `transpose` - rewrites chord tokens in place
//! - `latex` - emits chordsheet and slides markup
//! - `text` - writes a `Song` back to the plain-text format

use crate::registry::Keyword;
use std::collections::BTreeMap;
use std::fmt;

/// A leaf of the song tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Chord(String),
    Chordline(String),
    Text(String),
    Parentheses(String),
    Command { name: String, arg: Option<String> },
}

impl Token {
    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }

    pub fn chord(text: impl Into<String>) -> Self {
        Token::Chord(text.into())
    }

    /// True for tokens that carry chord symbols.
    pub fn is_chord(&self) -> bool {
        matches!(self, Token::Chord(_) | Token::Chordline(_))
    }
}

/// One rendered line of a stanza: a run of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub tokens: Vec<Token>,
}

impl Line {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// The lyric content of the line with chord markers removed.
    /// Parenthetical asides are included with their parentheses.
    pub fn lyrics(&self) -> String {
        self.tokens
            .iter()
            .map(|token| match token {
                Token::Text(text) => text.clone(),
                Token::Parentheses(text) => format!("({})", text),
                Token::Chord(_) | Token::Chordline(_) | Token::Command { .. } => String::new(),
            })
            .collect()
    }

    /// Chord symbols in the line, in order.
    pub fn chords(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Chord(chord) => Some(chord.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Identifies a stanza: its type keyword and optional number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StanzaKey {
    pub kind: Keyword,
    pub number: Option<u32>,
}

impl StanzaKey {
    pub fn new(kind: Keyword, number: Option<u32>) -> Self {
        Self { kind, number }
    }
}

impl fmt::Display for StanzaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "{} {}", self.kind, number),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// A named block of lyric and chord lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    pub key: StanzaKey,
    pub lines: Vec<Line>,
}

impl Stanza {
    pub fn new(key: StanzaKey, lines: Vec<Line>) -> Self {
        Self { key, lines }
    }

    /// Whether any line carries lyric text, i.e. whether the stanza has
    /// anything to show on a slide.
    pub fn has_lyrics(&self) -> bool {
        self.lines.iter().any(|line| !line.lyrics().trim().is_empty())
    }
}

/// A parsed song.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Song {
    pub attributes: BTreeMap<Keyword, String>,
    pub stanzas: Vec<Stanza>,
    pub chords_order: Vec<StanzaKey>,
    pub slides_order: Vec<StanzaKey>,
    /// Whether the order came from an `order:` command.
    pub explicit_order: bool,
}

impl Song {
    pub fn attribute(&self, keyword: Keyword) -> Option<&str> {
        self.attributes.get(&keyword).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.attribute(Keyword::Title)
    }

    pub fn stanza(&self, key: &StanzaKey) -> Option<&Stanza> {
        self.stanzas.iter().find(|stanza| &stanza.key == key)
    }

    /// Stanzas in chordsheet order. Repeated order entries yield the stanza
    /// again.
    pub fn chords_stanzas(&self) -> impl Iterator<Item = &Stanza> {
        self.chords_order.iter().filter_map(move |key| self.stanza(key))
    }

    pub fn slides_stanzas(&self) -> impl Iterator<Item = &Stanza> {
        self.slides_order.iter().filter_map(move |key| self.stanza(key))
    }
}
