//! # Error Types
//!
//! This module defines all error types for the chordtex compiler.
//!
//! Every structural error carries the 1-based line number of the raw input so
//! a caller converting a batch of files can point the user at the culprit.
//!
//! ## Error Types
//! - `StructuralParseError` - malformed command or stanza line
//! - `DuplicateCommandError` - the same stanza key declared twice
//! - `UnknownCommandError` - a keyword missing from the command registry
//! - `ChordAlignmentError` - a chord line whose tokens can't be located
//! - `OptionsError` - invalid YAML conversion options
//!
//! ## Usage
//! ```rust
//! use chordtex::{compile_chords, ChordTexError};
//!
//! match compile_chords("footer: nope") {
//!     Ok(latex) => println!("{}", latex),
//!     Err(ChordTexError::UnknownCommandError { line, keyword }) => {
//!         eprintln!("line {}: unknown command '{}'", line, keyword);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordTexError {
    /// A command or stanza line that doesn't fit the song file grammar.
    ///
    /// # Example
    /// ```
    /// # use chordtex::ChordTexError;
    /// let err = ChordTexError::StructuralParseError {
    ///     line: 3,
    ///     message: "stanza 'verse' takes no inline value".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 3: stanza 'verse' takes no inline value");
    /// ```
    #[error("Parse error at line {line}: {message}")]
    StructuralParseError { line: usize, message: String },

    /// A stanza key (type plus number) declared more than once.
    ///
    /// # Example
    /// ```
    /// # use chordtex::ChordTexError;
    /// let err = ChordTexError::DuplicateCommandError { line: 9, key: "chorus".to_string() };
    /// assert_eq!(err.to_string(), "Duplicate command at line 9: 'chorus' is already defined");
    /// ```
    #[error("Duplicate command at line {line}: '{key}' is already defined")]
    DuplicateCommandError { line: usize, key: String },

    /// A keyword that isn't in the command registry.
    #[error("Unknown command at line {line}: '{keyword}'")]
    UnknownCommandError { line: usize, keyword: String },

    /// The chord locator found a different number of chords than the chord
    /// line has whitespace-separated tokens.
    #[error("Chord alignment error at line {line}: {chords} chord tokens but {matches} chord positions")]
    ChordAlignmentError {
        line: usize,
        chords: usize,
        matches: usize,
    },

    /// Invalid conversion options.
    #[error("Invalid options: {0}")]
    OptionsError(String),
}

impl ChordTexError {
    /// Line number the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ChordTexError::StructuralParseError { line, .. }
            | ChordTexError::DuplicateCommandError { line, .. }
            | ChordTexError::UnknownCommandError { line, .. }
            | ChordTexError::ChordAlignmentError { line, .. } => Some(*line),
            ChordTexError::OptionsError(_) => None,
        }
    }
}
