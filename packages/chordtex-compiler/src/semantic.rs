//! # Ordering Resolution
//!
//! Decides which stanzas are emitted, and in what order, for each output.
//!
//! ## Rules
//!
//! ### Chordsheet order
//! - With an `order:` command, its comma-separated stanza keys are used as
//!   written. A key may appear more than once (a chorus sung twice).
//! - Without one, stanzas are emitted in declaration order.
//! - Stanzas missing from an explicit order are left out.
//!
//! ### Slides order
//! - The chordsheet order, minus stanzas with no lyric text (an instrumental
//!   intro has nothing to project).
//!
//! ## Entry Point
//! `resolve_order(order, stanzas) -> Result<(Vec<StanzaKey>, Vec<StanzaKey>), ChordTexError>`

use crate::ast::{Stanza, StanzaKey};
use crate::error::ChordTexError;
use crate::lexer::parse_stanza_number;
use crate::registry::Keyword;

/// Raw `order:` value and its line number.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    pub value: String,
    pub line: usize,
}

/// Parse an `order:` value into stanza keys.
pub fn parse_order(order: &OrderSpec) -> Result<Vec<StanzaKey>, ChordTexError> {
    let line = order.line;
    order.value
        .split(',')
        .map(|entry| {
            let words: Vec<&str> = entry.split_whitespace().collect();
            let (name, number) = match words.as_slice() {
                [name] => (*name, None),
                [name, number] => (*name, Some(parse_stanza_number(number, line)?)),
                [] => {
                    return Err(ChordTexError::StructuralParseError {
                        line,
                        message: "Empty entry in order list".to_string(),
                    })
                }
                _ => {
                    return Err(ChordTexError::StructuralParseError {
                        line,
                        message: format!("Invalid order entry '{}'", entry.trim()),
                    })
                }
            };

            let kind = Keyword::lookup(name).ok_or_else(|| ChordTexError::UnknownCommandError {
                line,
                keyword: name.to_lowercase(),
            })?;
            if !kind.is_stanza() {
                return Err(ChordTexError::StructuralParseError {
                    line,
                    message: format!("'{}' is not a stanza and can't be ordered", kind),
                });
            }
            Ok(StanzaKey::new(kind, number))
        })
        .collect()
}

/// Resolve the chordsheet and slides orders for a set of stanzas.
pub fn resolve_order(
    order: Option<&OrderSpec>,
    stanzas: &[Stanza],
) -> Result<(Vec<StanzaKey>, Vec<StanzaKey>), ChordTexError> {
    let chords_order = match order {
        Some(given) => {
            let keys = parse_order(given)?;
            if let Some(missing) = keys
                .iter()
                .find(|key| !stanzas.iter().any(|stanza| &stanza.key == *key))
            {
                return Err(ChordTexError::StructuralParseError {
                    line: given.line,
                    message: format!("Order refers to '{}', which is never defined", missing),
                });
            }
            keys
        }
        None => stanzas.iter().map(|stanza| stanza.key.clone()).collect(),
    };

    let omitted = stanzas
        .iter()
        .filter(|stanza| !chords_order.contains(&stanza.key))
        .count();
    if omitted > 0 {
        log::debug!("{} stanza(s) left out by the order list", omitted);
    }

    let slides_order = chords_order
        .iter()
        .filter(|key| {
            stanzas
                .iter()
                .find(|stanza| &stanza.key == *key)
                .map_or(false, Stanza::has_lyrics)
        })
        .cloned()
        .collect();

    Ok((chords_order, slides_order))
}
