//! Conversion options.
//!
//! Every field has a default, so an options file only needs the keys it
//! changes:
//!
//! ```yaml
//! transpose: -2
//! prefer-flats: true
//! hspace: '\hspace{4mm}'
//! ```

use crate::error::ChordTexError;
use crate::transpose::{Accidental, ChordMap};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Half-steps to transpose every chord by before emitting.
    pub transpose: i32,
    /// Spell transposed chords with flats instead of sharps.
    pub prefer_flats: bool,
    /// Directive substituted for runs of spaces.
    pub hspace: String,
    /// Joins the lines of a stanza in the chordsheet.
    pub chordsheet_line_break: String,
    /// Joins the lines of a stanza on slides.
    pub slides_line_break: String,
    pub sharp_glyph: String,
    pub flat_glyph: String,
    /// Title used when the song has no `title:` command.
    pub default_title: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            transpose: 0,
            prefer_flats: false,
            hspace: r"\hspace{3mm}".to_string(),
            chordsheet_line_break: "\\\\\n".to_string(),
            slides_line_break: "\\newline\n".to_string(),
            sharp_glyph: r"\#".to_string(),
            flat_glyph: r"$\flat$".to_string(),
            default_title: None,
        }
    }
}

impl ConvertOptions {
    /// Parse options from YAML. An empty document yields the defaults.
    pub fn from_yaml(source: &str) -> Result<Self, ChordTexError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| ChordTexError::OptionsError(e.to_string()))
    }

    pub fn accidental(&self) -> Accidental {
        if self.prefer_flats {
            Accidental::Flat
        } else {
            Accidental::Sharp
        }
    }

    /// The chord map to apply, if any transposition or respelling is asked for.
    pub fn chord_map(&self) -> Option<ChordMap> {
        if self.transpose.rem_euclid(12) == 0 && !self.prefer_flats {
            None
        } else {
            Some(ChordMap::new(self.transpose, self.accidental()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.hspace, "\\hspace{3mm}");
        assert_eq!(options.chordsheet_line_break, "\\\\\n");
        assert!(options.chord_map().is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let options = ConvertOptions::from_yaml("transpose: -2\nprefer-flats: true\n").unwrap();
        assert_eq!(options.transpose, -2);
        assert!(options.prefer_flats);
        assert_eq!(options.flat_glyph, "$\\flat$");
        let map = options.chord_map().unwrap();
        assert_eq!(map.halfsteps(), 10);
        assert_eq!(map.preference(), Accidental::Flat);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ConvertOptions::from_yaml("  \n").unwrap(), ConvertOptions::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ConvertOptions::from_yaml("transpse: 2").unwrap_err();
        assert!(matches!(err, ChordTexError::OptionsError(_)));
    }

    #[test]
    fn test_octave_transpose_is_identity() {
        let options = ConvertOptions {
            transpose: 12,
            ..ConvertOptions::default()
        };
        assert!(options.chord_map().is_none());
    }
}
