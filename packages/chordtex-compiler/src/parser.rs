use crate::ast::*;
use crate::chords::{group_parentheses, is_chord_line, splice, split_parentheses};
use crate::error::ChordTexError;
use crate::lexer::{Block, Lexer, SourceLine};
use crate::registry::Keyword;
use crate::semantic::{resolve_order, OrderSpec};

/// Builds the lines of one stanza from its body
pub struct StanzaBuilder<'a> {
    body: &'a [SourceLine<'a>],
    position: usize,
}

impl<'a> StanzaBuilder<'a> {
    pub fn new(body: &'a [SourceLine<'a>]) -> Self {
        Self { body, position: 0 }
    }

    fn current(&self) -> Option<&SourceLine<'a>> {
        self.body.get(self.position)
    }

    fn peek(&self) -> Option<&SourceLine<'a>> {
        self.body.get(self.position + 1)
    }

    /// Pair chord lines with the lyric lines below them.
    pub fn build(mut self) -> Result<Vec<Line>, ChordTexError> {
        let mut lines = Vec::with_capacity(self.body.len());

        while let Some(current) = self.current().copied() {
            if !is_chord_line(current.text) {
                lines.push(Line::new(split_parentheses(current.text)));
                self.position += 1;
                continue;
            }

            match self.peek().copied() {
                Some(next) if !is_chord_line(next.text) => {
                    let tokens = splice(current.text, next.text, current.number)?;
                    lines.push(Line::new(group_parentheses(tokens)));
                    self.position += 2;
                }
                // followed by another chord line, or the last line of the stanza
                _ => {
                    lines.push(Line::new(vec![Token::Chordline(
                        current.text.trim_end().to_string(),
                    )]));
                    self.position += 1;
                }
            }
        }

        Ok(lines)
    }
}

/// Parse song source into a [`Song`].
pub fn parse(source: &str) -> Result<Song, ChordTexError> {
    let blocks = Lexer::new(source).structure()?;

    let mut song = Song::default();
    let mut order: Option<OrderSpec> = None;

    for block in blocks {
        match block {
            Block::Attribute {
                keyword: Keyword::Order,
                value,
                line,
            } => {
                if order.is_some() {
                    log::warn!("line {}: 'order' given again, the last one wins", line);
                }
                order = Some(OrderSpec { value, line });
            }
            Block::Attribute { keyword, value, line } => {
                if let Some(previous) = song.attributes.insert(keyword, value) {
                    log::warn!(
                        "line {}: '{}' given again, replacing '{}'",
                        line,
                        keyword,
                        previous
                    );
                }
            }
            Block::Stanza { key, body, line } => {
                if song.stanza(&key).is_some() {
                    return Err(ChordTexError::DuplicateCommandError {
                        line,
                        key: key.to_string(),
                    });
                }
                let lines = StanzaBuilder::new(&body).build()?;
                log::debug!("stanza '{}': {} line(s)", key, lines.len());
                song.stanzas.push(Stanza::new(key, lines));
            }
        }
    }

    let (chords_order, slides_order) = resolve_order(order.as_ref(), &song.stanzas)?;
    song.chords_order = chords_order;
    song.slides_order = slides_order;
    song.explicit_order = order.is_some();

    Ok(song)
}
