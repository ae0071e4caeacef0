//! # Public API
//!
//! This module contains the main entry points for the chordtex library.
//!
//! ## Compilation Functions
//!
//! - [`compile_chords()`] - Chordsheet markup with default options
//! - [`compile_slides()`] - Slides markup with default options
//! - [`compile()`] - Both documents from one parse, with custom options
//! - [`compile_style()`] - A single document with custom options
//! - [`transpose_source()`] - Transpose a song and write it back as source text
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordtex::compile_chords;
//!
//! let source = "\
//! title: Amazing Grace
//!
//! verse 1:
//! G D G
//! Amazing grace
//! ";
//!
//! let latex = compile_chords(source)?;
//! assert!(latex.starts_with("\\songtitle{Amazing Grace}"));
//! # Ok::<(), chordtex::ChordTexError>(())
//! ```
//!
//! ## Advanced Usage
//!
//! Transposing a capo-2 song into concert pitch, spelled with flats:
//!
//! ```rust
//! use chordtex::{compile, ConvertOptions};
//!
//! let options = ConvertOptions {
//!     transpose: 3,
//!     prefer_flats: true,
//!     ..ConvertOptions::default()
//! };
//! let compiled = compile("verse:\nG D G\nAmazing grace", &options)?;
//! assert!(compiled.chords.contains("\\chord{B$\\flat$}"));
//! assert_eq!(compiled.slides, "\\verse{Amazing grace}");
//! # Ok::<(), chordtex::ChordTexError>(())
//! ```

use crate::ast::Song;
use crate::latex::{to_latex, Style};
use crate::options::ConvertOptions;
use crate::parser::parse;
use crate::text::to_text;
use crate::transpose::{Accidental, ChordMap};
use crate::ChordTexError;

/// Chordsheet and slides markup for one song.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compiled {
    pub chords: String,
    pub slides: String,
}

/// Parse and apply the transposition asked for in `options`.
fn prepare(source: &str, options: &ConvertOptions) -> Result<Song, ChordTexError> {
    let mut song = parse(source)?;
    if let Some(map) = options.chord_map() {
        song.transpose(&map);
    }
    Ok(song)
}

/// Compile a song to chordsheet markup.
///
/// # Pipeline
/// 1. Split the source into attribute and stanza blocks
/// 2. Splice chord lines into the lyrics below them
/// 3. Resolve the stanza order
/// 4. Run the chordsheet passes and emit markup
///
/// # Errors
/// Returns [`ChordTexError`] if the source can't be parsed. Nothing is
/// emitted for a song that fails.
pub fn compile_chords(source: &str) -> Result<String, ChordTexError> {
    compile_style(source, Style::Chordsheet, &ConvertOptions::default())
}

/// Compile a song to slides markup: lyrics only, no chords.
///
/// # Example
/// ```rust
/// use chordtex::compile_slides;
///
/// let slides = compile_slides("verse 1:\nG D G\nAmazing grace")?;
/// assert_eq!(slides, "\\verse[~1]{Amazing grace}");
/// # Ok::<(), chordtex::ChordTexError>(())
/// ```
pub fn compile_slides(source: &str) -> Result<String, ChordTexError> {
    compile_style(source, Style::Slides, &ConvertOptions::default())
}

/// Compile a song to one style of markup with custom options.
pub fn compile_style(source: &str, style: Style, options: &ConvertOptions) -> Result<String, ChordTexError> {
    let song = prepare(source, options)?;
    Ok(to_latex(&song, style, options))
}

/// Compile both documents from a single parse.
///
/// # Errors
/// Returns [`ChordTexError`] if the source can't be parsed.
pub fn compile(source: &str, options: &ConvertOptions) -> Result<Compiled, ChordTexError> {
    let song = prepare(source, options)?;
    Ok(Compiled {
        chords: to_latex(&song, Style::Chordsheet, options),
        slides: to_latex(&song, Style::Slides, options),
    })
}

/// Transpose a song and write it back in the source format.
///
/// # Example
/// ```rust
/// use chordtex::{transpose_source, Accidental};
///
/// let source = "verse:\nG  D/F#\nAmazing grace";
/// let up = transpose_source(source, 2, Accidental::Sharp)?;
/// assert_eq!(up, "verse:\nA  E/G#\nAmazing grace\n");
/// # Ok::<(), chordtex::ChordTexError>(())
/// ```
pub fn transpose_source(source: &str, halfsteps: i32, preference: Accidental) -> Result<String, ChordTexError> {
    let mut song = parse(source)?;
    song.transpose(&ChordMap::new(halfsteps, preference));
    Ok(to_text(&song))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_both_styles() {
        let compiled = compile("intro:\nG C\nG D\nverse:\nAmazing grace", &ConvertOptions::default()).unwrap();
        assert!(compiled.chords.contains("\\intro{"));
        assert_eq!(compiled.slides, "\\verse{Amazing grace}");
    }

    #[test]
    fn test_compile_applies_transpose() {
        let options = ConvertOptions {
            transpose: 2,
            ..ConvertOptions::default()
        };
        let latex = compile_style("verse:\nG\nAmazing grace", Style::Chordsheet, &options).unwrap();
        assert_eq!(latex, "\\verse{\\chord{A}Amazing grace}");
    }

    #[test]
    fn test_errors_propagate() {
        assert!(compile_chords("verse:\nchorus:\nverse:").is_err());
        assert!(compile_slides("footer: x").is_err());
    }
}
