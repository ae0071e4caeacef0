//! # Markup Emitter
//!
//! Turns a [`Song`] into chordsheet or slides markup through a fixed sequence
//! of passes. Each pass takes the whole document and returns a new one; later
//! passes rely on the earlier ones having run.
//!
//! 1. `escape_chords` - accidentals in chord symbols (slides: drop chords)
//! 2. `escape_chordlines` - same for standalone chord lines (slides: drop them)
//! 3. `handle_parentheses` - `(x2)` to `\emph{(x2)}` (slides: drop it)
//! 4. `substitute_spaces` - runs of spaces to a fixed `\hspace`
//! 5. `escape_ampersands` - `&` to `\&`
//! 6. `wrap_units` - stanzas and attributes become directives
//! 7. `prune_empty` - directives with nothing inside are removed

use crate::ast::{Line, Song, Token};
use crate::error::ChordTexError;
use crate::options::ConvertOptions;
use crate::registry::Keyword;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::str::FromStr;

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Attributes emitted before the stanzas, in this order.
const HEADER: [Keyword; 6] = [
    Keyword::Title,
    Keyword::By,
    Keyword::Comment,
    Keyword::Scripture,
    Keyword::Capo,
    Keyword::Format,
];

/// Which document to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Chords placed inside the lyrics, for musicians
    Chordsheet,
    /// Lyrics only, for projection
    Slides,
}

impl FromStr for Style {
    type Err = ChordTexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chordsheet" | "chords" => Ok(Style::Chordsheet),
            "slides" => Ok(Style::Slides),
            other => Err(ChordTexError::OptionsError(format!(
                "Unknown style '{}'. Expected 'chordsheet' or 'slides'",
                other
            ))),
        }
    }
}

/// Document content between passes.
#[derive(Debug, Clone, PartialEq)]
enum Unit {
    Attribute {
        directive: &'static str,
        value: String,
    },
    Stanza {
        directive: &'static str,
        number: Option<u32>,
        lines: Vec<Line>,
    },
}

/// `\name[option]{body}`
#[derive(Debug, Clone, PartialEq)]
struct Directive {
    name: &'static str,
    option: Option<String>,
    body: String,
}

impl Directive {
    fn render(&self) -> String {
        match &self.option {
            Some(option) => format!("\\{}[{}]{{{}}}", self.name, option, self.body),
            None => latex_command(self.name, &self.body),
        }
    }
}

/// `\command{arg}`
pub fn latex_command(command: &str, arg: &str) -> String {
    format!("\\{}{{{}}}", command, arg)
}

/// Emit `song` as markup in the given style.
pub fn to_latex(song: &Song, style: Style, options: &ConvertOptions) -> String {
    let units = collect_units(song, style, options);
    let units = escape_chords(units, style, options);
    let units = escape_chordlines(units, style, options);
    let units = handle_parentheses(units, style);
    let units = substitute_spaces(units, options);
    let units = escape_ampersands(units);
    let directives = wrap_units(units, style, options);
    let directives = prune_empty(directives);
    log::trace!("{:?}: {} directive(s) after pruning", style, directives.len());

    directives
        .iter()
        .map(Directive::render)
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_units(song: &Song, style: Style, options: &ConvertOptions) -> Vec<Unit> {
    let mut units = Vec::new();

    for keyword in HEADER {
        if style == Style::Slides && keyword == Keyword::Capo {
            continue;
        }
        let value = match (song.attribute(keyword), keyword) {
            (Some(value), _) => Some(value.to_string()),
            (None, Keyword::Title) => options.default_title.clone(),
            (None, _) => None,
        };
        if let Some(value) = value {
            units.push(Unit::Attribute {
                directive: keyword.directive(),
                value,
            });
        }
    }

    let stanzas: Vec<_> = match style {
        Style::Chordsheet => song.chords_stanzas().collect(),
        Style::Slides => song.slides_stanzas().collect(),
    };
    for stanza in stanzas {
        units.push(Unit::Stanza {
            directive: stanza.key.kind.directive(),
            number: stanza.key.number,
            lines: stanza.lines.clone(),
        });
    }

    units
}

/// Apply `f` to every stanza line; lines mapped to `None` are dropped.
fn map_lines(units: Vec<Unit>, f: impl Fn(Line) -> Option<Line>) -> Vec<Unit> {
    units
        .into_iter()
        .map(|unit| match unit {
            Unit::Stanza {
                directive,
                number,
                lines,
            } => Unit::Stanza {
                directive,
                number,
                lines: lines.into_iter().filter_map(&f).collect(),
            },
            attribute @ Unit::Attribute { .. } => attribute,
        })
        .collect()
}

fn map_tokens(units: Vec<Unit>, f: impl Fn(Token) -> Token) -> Vec<Unit> {
    map_lines(units, |line| Some(Line::new(line.tokens.into_iter().map(&f).collect())))
}

/// Replace accidentals with their markup glyphs.
fn escape_accidentals(chord: &str, options: &ConvertOptions) -> String {
    let mut escaped = String::with_capacity(chord.len() + 8);
    for c in chord.chars() {
        match c {
            '#' => escaped.push_str(&options.sharp_glyph),
            'b' => escaped.push_str(&options.flat_glyph),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Join neighbouring Text tokens and trim the end of the line. Returns `None`
/// when nothing is left.
fn tidy_slide_line(tokens: Vec<Token>) -> Option<Line> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let (Some(Token::Text(previous)), Token::Text(text)) = (merged.last_mut(), &token) {
            previous.push_str(text);
            continue;
        }
        merged.push(token);
    }
    if let Some(Token::Text(last)) = merged.last_mut() {
        let trimmed = last.trim_end().len();
        last.truncate(trimmed);
    }
    merged.retain(|token| !matches!(token, Token::Text(text) if text.is_empty()));
    if merged.is_empty() {
        None
    } else {
        Some(Line::new(merged))
    }
}

fn escape_chords(units: Vec<Unit>, style: Style, options: &ConvertOptions) -> Vec<Unit> {
    match style {
        Style::Chordsheet => map_tokens(units, |token| match token {
            Token::Chord(chord) => Token::Chord(escape_accidentals(&chord, options)),
            other => other,
        }),
        Style::Slides => map_lines(units, |line| {
            let tokens = line
                .tokens
                .into_iter()
                .filter(|token| !matches!(token, Token::Chord(_)))
                .collect();
            tidy_slide_line(tokens)
        }),
    }
}

fn escape_chordlines(units: Vec<Unit>, style: Style, options: &ConvertOptions) -> Vec<Unit> {
    match style {
        Style::Chordsheet => map_tokens(units, |token| match token {
            Token::Chordline(chords) => Token::Chordline(escape_accidentals(&chords, options)),
            other => other,
        }),
        Style::Slides => map_lines(units, |line| {
            let tokens: Vec<Token> = line
                .tokens
                .into_iter()
                .filter(|token| !matches!(token, Token::Chordline(_)))
                .collect();
            if tokens.is_empty() {
                None
            } else {
                Some(Line::new(tokens))
            }
        }),
    }
}

fn handle_parentheses(units: Vec<Unit>, style: Style) -> Vec<Unit> {
    match style {
        Style::Chordsheet => map_tokens(units, |token| match token {
            Token::Parentheses(text) => Token::Command {
                name: "emph".to_string(),
                arg: Some(format!("({})", text)),
            },
            other => other,
        }),
        Style::Slides => map_lines(units, |line| {
            let mut tokens: Vec<Token> = Vec::with_capacity(line.tokens.len());
            let mut trim_next = false;
            for token in line.tokens {
                match token {
                    Token::Parentheses(_) => {
                        // drop the space that separated the aside from the lyrics
                        match tokens.last_mut() {
                            Some(Token::Text(previous)) => {
                                let trimmed = previous.trim_end().len();
                                previous.truncate(trimmed);
                                trim_next = previous.is_empty();
                            }
                            _ => trim_next = true,
                        }
                    }
                    Token::Text(text) if trim_next => {
                        trim_next = false;
                        tokens.push(Token::Text(text.trim_start().to_string()));
                    }
                    other => {
                        trim_next = false;
                        tokens.push(other);
                    }
                }
            }
            tidy_slide_line(tokens)
        }),
    }
}

fn substitute_spaces(units: Vec<Unit>, options: &ConvertOptions) -> Vec<Unit> {
    let hspace = options.hspace.as_str();
    map_tokens(units, |token| match token {
        Token::Text(text) => Token::Text(SPACE_RUN.replace_all(&text, NoExpand(hspace)).into_owned()),
        Token::Chordline(chords) => {
            Token::Chordline(SPACE_RUN.replace_all(&chords, NoExpand(hspace)).into_owned())
        }
        other => other,
    })
}

fn escape_ampersand(text: &str) -> String {
    text.replace('&', "\\&")
}

fn escape_ampersands(units: Vec<Unit>) -> Vec<Unit> {
    let units = map_tokens(units, |token| match token {
        Token::Text(text) => Token::Text(escape_ampersand(&text)),
        Token::Chordline(chords) => Token::Chordline(escape_ampersand(&chords)),
        Token::Command { name, arg } => Token::Command {
            name,
            arg: arg.map(|arg| escape_ampersand(&arg)),
        },
        other => other,
    });
    units
        .into_iter()
        .map(|unit| match unit {
            Unit::Attribute { directive, value } => Unit::Attribute {
                directive,
                value: escape_ampersand(&value),
            },
            stanza @ Unit::Stanza { .. } => stanza,
        })
        .collect()
}

fn render_token(token: &Token) -> String {
    match token {
        Token::Chord(chord) => latex_command("chord", chord),
        Token::Chordline(chords) => latex_command("chordline", chords),
        Token::Text(text) => text.clone(),
        Token::Parentheses(text) => format!("({})", text),
        Token::Command { name, arg: Some(arg) } => latex_command(name, arg),
        Token::Command { name, arg: None } => format!("\\{}", name),
    }
}

fn render_line(line: &Line) -> String {
    line.tokens.iter().map(render_token).collect()
}

fn wrap_units(units: Vec<Unit>, style: Style, options: &ConvertOptions) -> Vec<Directive> {
    let line_break = match style {
        Style::Chordsheet => options.chordsheet_line_break.as_str(),
        Style::Slides => options.slides_line_break.as_str(),
    };

    units
        .into_iter()
        .map(|unit| match unit {
            Unit::Attribute { directive, value } => Directive {
                name: directive,
                option: None,
                body: value,
            },
            Unit::Stanza {
                directive,
                number,
                lines,
            } => Directive {
                name: directive,
                option: number.map(|number| format!("~{}", number)),
                body: lines.iter().map(render_line).collect::<Vec<_>>().join(line_break),
            },
        })
        .collect()
}

fn prune_empty(directives: Vec<Directive>) -> Vec<Directive> {
    directives
        .into_iter()
        .filter(|directive| !directive.body.trim().is_empty())
        .collect()
}
