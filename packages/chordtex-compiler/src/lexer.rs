use crate::ast::StanzaKey;
use crate::error::ChordTexError;
use crate::registry::{CommandKind, Keyword};

/// A raw line of the song body with its 1-based source line number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// A command line together with the lines that belong to it.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<'a> {
    /// `key: value`
    Attribute {
        keyword: Keyword,
        value: String,
        line: usize,
    },
    /// `verse 1:` followed by its body lines
    Stanza {
        key: StanzaKey,
        body: Vec<SourceLine<'a>>,
        line: usize,
    },
}

/// Splits song source into attribute and stanza blocks
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Group the non-blank lines of the input under the command line that
    /// precedes them.
    pub fn structure(&self) -> Result<Vec<Block<'a>>, ChordTexError> {
        let mut blocks = Vec::new();
        let mut current: Option<Block<'a>> = None;

        for (index, text) in self.input.lines().enumerate() {
            let number = index + 1;

            if is_blank(text) {
                continue;
            }

            if is_command(text) {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                current = Some(parse_command(text, number)?);
                continue;
            }

            match current.as_mut() {
                Some(Block::Stanza { body, .. }) => body.push(SourceLine { number, text }),
                Some(Block::Attribute { keyword, .. }) => {
                    return Err(ChordTexError::StructuralParseError {
                        line: number,
                        message: format!(
                            "'{}' is a single-line command and can't be followed by lyric or chord lines",
                            keyword
                        ),
                    });
                }
                None => {
                    return Err(ChordTexError::StructuralParseError {
                        line: number,
                        message: "Line appears before any command. Start the section with e.g. 'verse 1:'"
                            .to_string(),
                    });
                }
            }
        }

        if let Some(block) = current {
            blocks.push(block);
        }

        log::debug!("structured {} blocks", blocks.len());
        Ok(blocks)
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_command(line: &str) -> bool {
    line.contains(':')
}

fn parse_command(text: &str, line: usize) -> Result<Block<'_>, ChordTexError> {
    let (head, value) = text.split_once(':').unwrap_or((text, ""));
    let value = value.trim();
    let mut words = head.split_whitespace();

    let name = words.next().ok_or_else(|| ChordTexError::StructuralParseError {
        line,
        message: "Missing command name before ':'".to_string(),
    })?;
    let keyword = Keyword::lookup(name).ok_or_else(|| ChordTexError::UnknownCommandError {
        line,
        keyword: name.to_lowercase(),
    })?;
    let rest: Vec<&str> = words.collect();

    match keyword.kind() {
        CommandKind::Attribute => {
            if !rest.is_empty() {
                return Err(ChordTexError::StructuralParseError {
                    line,
                    message: format!("Unexpected '{}' after command '{}'", rest.join(" "), keyword),
                });
            }
            Ok(Block::Attribute {
                keyword,
                value: value.to_string(),
                line,
            })
        }
        CommandKind::Stanza => {
            let number = match rest.as_slice() {
                [] => None,
                [number] => Some(parse_stanza_number(number, line)?),
                _ => {
                    return Err(ChordTexError::StructuralParseError {
                        line,
                        message: format!(
                            "Stanza '{}' takes at most one number, found '{}'",
                            keyword,
                            rest.join(" ")
                        ),
                    })
                }
            };
            if !value.is_empty() {
                return Err(ChordTexError::StructuralParseError {
                    line,
                    message: format!(
                        "Stanza '{}' takes no inline value; put '{}' on the next line",
                        keyword, value
                    ),
                });
            }
            Ok(Block::Stanza {
                key: StanzaKey::new(keyword, number),
                body: Vec::new(),
                line,
            })
        }
    }
}

/// Parse the numeric qualifier of a stanza key (`verse 2`).
/// Only plain digits with a value of at least 1 are accepted, so `+1` and
/// `01` can't alias `1`.
pub(crate) fn parse_stanza_number(text: &str, line: usize) -> Result<u32, ChordTexError> {
    let digits_only = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) && !text.starts_with('0');
    match text.parse::<u32>() {
        Ok(number) if digits_only => Ok(number),
        _ => Err(ChordTexError::StructuralParseError {
            line,
            message: format!("Stanza number must be a positive integer, found '{}'", text),
        }),
    }
}
