pub mod api;
pub mod ast;
pub mod chords;
pub mod error;
pub mod latex;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod registry;
pub mod semantic;
pub mod text;
pub mod transpose;

pub use api::{compile, compile_chords, compile_slides, compile_style, transpose_source, Compiled};
pub use ast::*;
pub use chords::{is_chord_line, splice};
pub use error::*;
pub use latex::{to_latex, Style};
pub use options::ConvertOptions;
pub use parser::parse;
pub use registry::{CommandKind, Keyword};
pub use text::to_text;
pub use transpose::{transpose_song, Accidental, ChordMap};
