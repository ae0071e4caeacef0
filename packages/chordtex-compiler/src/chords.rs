//! Chord line detection and chord-over-lyric splicing.
//!
//! A lead sheet places chords on their own line, each chord starting in the
//! column of the syllable it belongs to:
//!
//! ```text
//! G      D  G
//! Praise ye the Lord
//! ```
//!
//! [`splice`] merges such a pair into one run of tokens:
//! `Text("")`, `Chord("G")`, `Text("Praise ")`, `Chord("D")`, `Text("ye ")`,
//! `Chord("G")`, `Text("the Lord")`.

use crate::ast::Token;
use crate::error::ChordTexError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Letters, digits and accidentals a chord line may contain.
const CHORD_ALPHABET: &str = "ABCDEFGb#minajsugd123456789";

/// Letters that never occur in a chord symbol.
const NOT_CHORDS: &str = "HJKLOPQRTVWXYZ";

/// Start of a chord symbol such as `A`, `Bbm7` or `D/F#`.
static CHORD_LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-G][1-9#bMminAajSsugDd]*(?:/[A-G][1-9#bMminAajSsugDd]*)?").unwrap()
});

/// Whether a line holds only chord symbols.
///
/// Every alphanumeric character must come from the chord alphabet and none of
/// the excluded letters may appear. This is a letter-set heuristic: a short
/// lyric such as `a man sang` passes it too.
pub fn is_chord_line(line: &str) -> bool {
    let only_chord_letters = line
        .chars()
        .filter(|c| c.is_alphanumeric())
        .all(|c| CHORD_ALPHABET.contains(c));
    let has_excluded = line.chars().any(|c| NOT_CHORDS.contains(c));
    only_chord_letters && !has_excluded
}

/// Character columns at which chord symbols start.
fn chord_columns(chord_line: &str) -> Vec<usize> {
    CHORD_LOCATION
        .find_iter(chord_line)
        .map(|m| chord_line[..m.start()].chars().count())
        .collect()
}

/// Merge a chord line into the lyric line below it.
///
/// `line` is the source line number of the chord line, used for errors.
/// The lyric line is right-padded to the chord line's width so chords past
/// the end of the lyrics still have a column to sit on.
pub fn splice(chord_line: &str, lyric_line: &str, line: usize) -> Result<Vec<Token>, ChordTexError> {
    let symbols: Vec<&str> = chord_line.split_whitespace().collect();
    let columns = chord_columns(chord_line);

    if symbols.len() != columns.len() {
        return Err(ChordTexError::ChordAlignmentError {
            line,
            chords: symbols.len(),
            matches: columns.len(),
        });
    }

    let width = chord_line.chars().count().max(lyric_line.chars().count());
    let mut lyric: Vec<char> = lyric_line.chars().collect();
    lyric.resize(width, ' ');

    // Walk right to left so every cut happens before the columns already used.
    let mut tokens = Vec::with_capacity(symbols.len() * 2 + 1);
    let mut end = width;
    for (&column, &symbol) in columns.iter().zip(symbols.iter()).rev() {
        let start = column.min(end);
        let segment: String = lyric[start..end].iter().collect();
        if !(segment.is_empty() && tokens.is_empty()) {
            tokens.push(Token::Text(segment));
        }
        tokens.push(Token::chord(symbol));
        end = start;
    }
    tokens.push(Token::Text(lyric[..end].iter().collect()));
    tokens.reverse();

    Ok(tokens)
}

static PARENTHESES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

/// Split text on balanced `( ... )` groups.
pub(crate) fn split_parentheses(text: &str) -> Vec<Token> {
    group_parentheses(vec![Token::text(text)])
}

/// Regroup a spliced line so every `( ... )` aside becomes one
/// `Parentheses` token, even when the splice cut through it. A chord placed
/// inside an aside moves to just before it.
pub(crate) fn group_parentheses(tokens: Vec<Token>) -> Vec<Token> {
    let mut text = String::new();
    let mut anchored: Vec<(usize, Token)> = Vec::new();
    for token in tokens {
        match token {
            Token::Text(segment) => text.push_str(&segment),
            other => anchored.push((text.len(), other)),
        }
    }

    let spans: Vec<(usize, usize, String)> = PARENTHESES
        .captures_iter(&text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let inner = captures.get(1)?;
            Some((whole.start(), whole.end(), inner.as_str().to_string()))
        })
        .collect();

    for (offset, _) in anchored.iter_mut() {
        if let Some(&(start, _, _)) = spans.iter().find(|(start, end, _)| *start < *offset && *offset < *end) {
            *offset = start;
        }
    }

    let mut out = Vec::new();
    let mut cursor = 0;
    let mut anchors = anchored.into_iter().peekable();
    for (start, end, inner) in spans {
        flush_segment(&mut out, &text, &mut cursor, start, &mut anchors);
        out.push(Token::Parentheses(inner));
        cursor = end;
    }
    flush_segment(&mut out, &text, &mut cursor, text.len(), &mut anchors);
    out
}

/// Emit the text up to `until`, placing anchored tokens at their offsets.
/// Empty text is kept only as the lead-in before a first chord.
fn flush_segment(
    out: &mut Vec<Token>,
    text: &str,
    cursor: &mut usize,
    until: usize,
    anchors: &mut std::iter::Peekable<std::vec::IntoIter<(usize, Token)>>,
) {
    while let Some((offset, token)) = anchors.next_if(|(offset, _)| *offset <= until) {
        let segment = &text[*cursor..offset];
        if !segment.is_empty() || out.is_empty() {
            out.push(Token::text(segment));
        }
        out.push(token);
        *cursor = offset;
    }
    if *cursor < until {
        out.push(Token::text(&text[*cursor..until]));
    }
    *cursor = until;
}
