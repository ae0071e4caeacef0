use chordtex::Accidental;
use chordtex_cli::{convert_all, convert_book, logger, transpose_file, Config, Targets};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "chordtex", version)]
#[command(about = "Convert plain-text lead sheets into chord sheet and slide markup")]
struct Args {
    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write <name>.chords.tex and/or <name>.slides.tex for each song
    Convert {
        /// Song files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the chordsheet
        #[arg(long)]
        chords: bool,

        /// Write the slides
        #[arg(long)]
        slides: bool,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Transpose every chord by this many half-steps
        #[arg(short, long, allow_negative_numbers = true)]
        transpose: Option<i32>,

        /// Spell transposed chords with flats
        #[arg(long)]
        flats: bool,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Join all songs, in order, into <BOOK>.chords.tex and <BOOK>.slides.tex
        #[arg(long, value_name = "BOOK")]
        book: Option<String>,
    },

    /// Transpose a song file and print it in the source format
    Transpose {
        file: PathBuf,

        /// Half-steps, negative to go down
        #[arg(allow_negative_numbers = true)]
        halfsteps: i32,

        /// Spell chords with flats
        #[arg(long)]
        flats: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the bundled sample songs
    List,
}

fn main() {
    let args = Args::parse();
    logger::init(logger::level_for(args.verbose, args.quiet));

    let code = match args.command {
        Command::Convert {
            files,
            chords,
            slides,
            out_dir,
            transpose,
            flats,
            config,
            book,
        } => {
            let config = match config {
                Some(path) => Config::load(&path).unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                }),
                None => Config::default(),
            };

            let mut options = config.options;
            if let Some(halfsteps) = transpose {
                options.transpose = halfsteps;
            }
            if flats {
                options.prefer_flats = true;
            }
            let out_dir = out_dir.or(config.out_dir);

            let targets = Targets::from_flags(chords, slides);
            let summary = match &book {
                Some(stem) => convert_book(&files, stem, out_dir.as_deref(), targets, &options),
                None => convert_all(&files, out_dir.as_deref(), targets, &options),
            };
            for error in &summary.failed {
                eprintln!("{}", error);
            }
            if !args.quiet {
                eprintln!(
                    "Converted {} of {} file(s), wrote {} file(s)",
                    files.len().saturating_sub(summary.failed.len()),
                    files.len(),
                    summary.written.len()
                );
            }
            if summary.is_success() {
                0
            } else {
                1
            }
        }

        Command::Transpose {
            file,
            halfsteps,
            flats,
            output,
        } => {
            let preference = if flats { Accidental::Flat } else { Accidental::Sharp };
            let text = transpose_file(&file, halfsteps, preference).unwrap_or_else(|e| {
                eprintln!("{}", e);
                process::exit(1);
            });
            match output {
                Some(path) => {
                    if let Err(e) = fs::write(&path, &text) {
                        eprintln!("Error writing to '{}': {}", path.display(), e);
                        process::exit(1);
                    }
                    eprintln!("Wrote transposed song to {}", path.display());
                }
                None => print!("{}", text),
            }
            0
        }

        Command::List => {
            for name in chordtex_songs::list_songs() {
                println!("{}", name);
            }
            0
        }
    };

    process::exit(code);
}
