pub mod config;
pub mod error;
pub mod logger;

pub use config::Config;
pub use error::CliError;

use chordtex::{Accidental, Compiled, ConvertOptions, Style};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Which documents `convert` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    pub chords: bool,
    pub slides: bool,
}

impl Targets {
    /// Both documents unless one was asked for explicitly.
    pub fn from_flags(chords: bool, slides: bool) -> Self {
        if !chords && !slides {
            Self {
                chords: true,
                slides: true,
            }
        } else {
            Self { chords, slides }
        }
    }
}

fn stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "song".to_string())
}

fn document_name(stem: &str, style: Style) -> String {
    let suffix = match style {
        Style::Chordsheet => "chords",
        Style::Slides => "slides",
    };
    format!("{}.{}.tex", stem, suffix)
}

fn target_dir(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
}

/// `<out_dir>/<stem>.chords.tex` or `<stem>.slides.tex`. Without an output
/// directory the file goes next to the input.
pub fn output_path(input: &Path, out_dir: Option<&Path>, style: Style) -> PathBuf {
    target_dir(input, out_dir).join(document_name(&stem(input), style))
}

/// Read and compile one song, titled after its file stem when it has no
/// `title:` of its own.
fn compile_file(input: &Path, options: &ConvertOptions) -> Result<Compiled, CliError> {
    let source = fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let mut options = options.clone();
    if options.default_title.is_none() {
        options.default_title = Some(stem(input));
    }

    chordtex::compile(&source, &options).map_err(|source| CliError::Convert {
        path: input.to_path_buf(),
        source,
    })
}

fn selected(targets: Targets, dir: &Path, stem: &str, compiled: Compiled) -> Vec<(PathBuf, String)> {
    let mut outputs = Vec::new();
    if targets.chords {
        outputs.push((dir.join(document_name(stem, Style::Chordsheet)), compiled.chords));
    }
    if targets.slides {
        outputs.push((dir.join(document_name(stem, Style::Slides)), compiled.slides));
    }
    outputs
}

/// Write every document or none of them.
///
/// Each document is staged in a temporary file next to its destination and
/// only renamed into place once all of them were written. If a rename
/// fails, the documents already moved are removed again.
fn write_documents(outputs: Vec<(PathBuf, String)>) -> Result<Vec<PathBuf>, CliError> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, latex) in outputs {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let write_error = |source| CliError::Write {
            path: path.clone(),
            source,
        };
        let mut file = NamedTempFile::new_in(&dir).map_err(write_error)?;
        writeln!(file, "{}", latex).map_err(write_error)?;
        staged.push((path, file));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (path, file) in staged {
        if let Err(e) = file.persist(&path) {
            for done in &written {
                if let Err(cleanup) = fs::remove_file(done) {
                    log::warn!("could not remove {}: {}", done.display(), cleanup);
                }
            }
            return Err(CliError::Write { path, source: e.error });
        }
        log::info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn ensure_dir(dir: Option<&Path>) -> Result<(), CliError> {
    if let Some(dir) = dir {
        fs::create_dir_all(dir).map_err(|source| CliError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Convert one song file. Nothing is left on disk unless every selected
/// document was written.
pub fn convert_file(
    input: &Path,
    out_dir: Option<&Path>,
    targets: Targets,
    options: &ConvertOptions,
) -> Result<Vec<PathBuf>, CliError> {
    let compiled = compile_file(input, options)?;
    ensure_dir(out_dir)?;
    write_documents(selected(targets, &target_dir(input, out_dir), &stem(input), compiled))
}

/// Outcome of a batch conversion.
#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<CliError>,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every input in turn. A failing file is recorded and the batch
/// moves on to the next one.
pub fn convert_all(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    targets: Targets,
    options: &ConvertOptions,
) -> Summary {
    let mut summary = Summary::default();
    for input in inputs {
        log::debug!("converting {}", input.display());
        match convert_file(input, out_dir, targets, options) {
            Ok(written) => summary.written.extend(written),
            Err(e) => summary.failed.push(e),
        }
    }
    summary
}

/// Songs joined, in the order given, into one chordsheet and one slides
/// document.
#[derive(Debug, Default)]
pub struct Songbook {
    pub compiled: Compiled,
    pub songs: Vec<PathBuf>,
    pub failed: Vec<CliError>,
}

/// Compile `inputs` into a songbook. Songs that fail are reported and left
/// out.
pub fn compile_book(inputs: &[PathBuf], options: &ConvertOptions) -> Songbook {
    let mut chords = Vec::new();
    let mut slides = Vec::new();
    let mut book = Songbook::default();

    for input in inputs {
        match compile_file(input, options) {
            Ok(compiled) => {
                chords.push(compiled.chords);
                slides.push(compiled.slides);
                book.songs.push(input.clone());
            }
            Err(e) => {
                log::debug!("leaving {} out of the songbook", input.display());
                book.failed.push(e);
            }
        }
    }

    book.compiled = Compiled {
        chords: chords.join("\n\n"),
        slides: slides.join("\n\n"),
    };
    book
}

/// Write a songbook as `<out_dir>/<stem>.chords.tex` and `<stem>.slides.tex`.
/// Nothing is written when no song compiled.
pub fn convert_book(
    inputs: &[PathBuf],
    stem: &str,
    out_dir: Option<&Path>,
    targets: Targets,
    options: &ConvertOptions,
) -> Summary {
    let book = compile_book(inputs, options);
    let mut summary = Summary {
        written: Vec::new(),
        failed: book.failed,
    };
    if book.songs.is_empty() {
        return summary;
    }

    let result = ensure_dir(out_dir).and_then(|()| {
        let dir = out_dir.map(Path::to_path_buf).unwrap_or_default();
        write_documents(selected(targets, &dir, stem, book.compiled))
    });
    match result {
        Ok(written) => summary.written = written,
        Err(e) => summary.failed.push(e),
    }
    summary
}

/// Read a song file and return it transposed, in the source format.
pub fn transpose_file(input: &Path, halfsteps: i32, preference: Accidental) -> Result<String, CliError> {
    let source = fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    chordtex::transpose_source(&source, halfsteps, preference).map_err(|source| CliError::Convert {
        path: input.to_path_buf(),
        source,
    })
}
