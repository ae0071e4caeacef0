//! Writes a [`Song`] back to the plain-text source format.
//!
//! Useful after transposing: the result parses again into the same song.
//! Chords go back on a line of their own above the lyrics. When a transposed
//! chord has grown into the next one, the later chord moves right so that one
//! space always separates them.

use crate::ast::{Line, Song, Token};

/// Render `song` as source text.
pub fn to_text(song: &Song) -> String {
    let mut out = String::new();

    for (keyword, value) in &song.attributes {
        if value.is_empty() {
            out.push_str(&format!("{}:\n", keyword));
        } else {
            out.push_str(&format!("{}: {}\n", keyword, value));
        }
    }
    if song.explicit_order {
        let order: Vec<String> = song.chords_order.iter().map(|key| key.to_string()).collect();
        out.push_str(&format!("order: {}\n", order.join(", ")));
    }

    for stanza in &song.stanzas {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{}:\n", stanza.key));
        for line in &stanza.lines {
            write_line(&mut out, line);
        }
    }

    out
}

fn write_line(out: &mut String, line: &Line) {
    let mut chords = String::new();
    let mut lyrics = String::new();
    let mut column = 0;

    for token in &line.tokens {
        match token {
            Token::Chord(chord) => {
                let width = chords.chars().count();
                let start = if width == 0 { column } else { column.max(width + 1) };
                chords.extend(std::iter::repeat(' ').take(start - width));
                chords.push_str(chord);
            }
            Token::Chordline(chord_line) => chords.push_str(chord_line),
            Token::Text(text) => {
                column += text.chars().count();
                lyrics.push_str(text);
            }
            Token::Parentheses(text) => {
                let aside = format!("({})", text);
                column += aside.chars().count();
                lyrics.push_str(&aside);
            }
            Token::Command { .. } => {}
        }
    }

    for row in [chords.trim_end(), lyrics.trim_end()] {
        if !row.trim().is_empty() {
            out.push_str(row);
            out.push('\n');
        }
    }
}
