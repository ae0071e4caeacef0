use chordtex::ChordTexError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Error reading file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error writing to '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Convert { path: PathBuf, source: ChordTexError },

    #[error("Invalid config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}
