//! Batch conversion tests against a scratch directory.

use chordtex::{Accidental, ConvertOptions};
use chordtex_cli::{compile_book, convert_all, convert_book, convert_file, transpose_file, CliError, Config, Targets};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const GOOD: &str = "title: Amazing Grace\n\nverse 1:\nG D G\nAmazing grace\n";
const BAD: &str = "title: Broken\nfooter: nope\n";
const OTHER: &str = "title: How Great\n\nchorus:\nC G\nHow great Thou art\n";

fn write_song(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_convert_writes_both_documents() {
    let dir = tempdir().unwrap();
    let input = write_song(dir.path(), "grace.txt", GOOD);

    let written = convert_file(&input, None, Targets::from_flags(false, false), &ConvertOptions::default()).unwrap();
    assert_eq!(written.len(), 2);

    let chords = fs::read_to_string(dir.path().join("grace.chords.tex")).unwrap();
    assert!(chords.starts_with("\\songtitle{Amazing Grace}\n\\verse[~1]{\\chord{G}"));
    let slides = fs::read_to_string(dir.path().join("grace.slides.tex")).unwrap();
    assert_eq!(slides, "\\songtitle{Amazing Grace}\n\\verse[~1]{Amazing grace}\n");
}

#[test]
fn test_convert_single_target_into_out_dir() {
    let dir = tempdir().unwrap();
    let input = write_song(dir.path(), "grace.txt", GOOD);
    let out = dir.path().join("build");

    let written = convert_file(&input, Some(&out), Targets::from_flags(false, true), &ConvertOptions::default()).unwrap();
    assert_eq!(written, vec![out.join("grace.slides.tex")]);
    assert!(!out.join("grace.chords.tex").exists());
}

#[test]
fn test_failed_song_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = write_song(dir.path(), "broken.txt", BAD);

    let err = convert_file(&input, None, Targets::from_flags(false, false), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::Convert { .. }));
    assert!(err.to_string().contains("footer"));
    assert!(!dir.path().join("broken.chords.tex").exists());
    assert!(!dir.path().join("broken.slides.tex").exists());
}

#[test]
fn test_batch_continues_after_failure() {
    let dir = tempdir().unwrap();
    let inputs = vec![
        write_song(dir.path(), "broken.txt", BAD),
        dir.path().join("missing.txt"),
        write_song(dir.path(), "grace.txt", GOOD),
    ];

    let summary = convert_all(&inputs, None, Targets::from_flags(true, false), &ConvertOptions::default());
    assert!(!summary.is_success());
    assert_eq!(summary.failed.len(), 2);
    assert!(matches!(summary.failed[1], CliError::Read { .. }));
    assert_eq!(summary.written, vec![dir.path().join("grace.chords.tex")]);
}

#[test]
fn test_file_stem_is_default_title() {
    let dir = tempdir().unwrap();
    let input = write_song(dir.path(), "untitled-hymn.txt", "verse:\nAmazing grace\n");

    convert_file(&input, None, Targets::from_flags(true, false), &ConvertOptions::default()).unwrap();
    let chords = fs::read_to_string(dir.path().join("untitled-hymn.chords.tex")).unwrap();
    assert!(chords.starts_with("\\songtitle{untitled-hymn}"));
}

#[test]
fn test_config_options_apply() {
    let dir = tempdir().unwrap();
    let config_path = write_song(dir.path(), "chordtex.yaml", "options:\n  transpose: 2\n");
    let input = write_song(dir.path(), "grace.txt", GOOD);

    let config = Config::load(&config_path).unwrap();
    convert_file(&input, None, Targets::from_flags(true, false), &config.options).unwrap();
    let chords = fs::read_to_string(dir.path().join("grace.chords.tex")).unwrap();
    assert!(chords.contains("\\chord{A}"));
    assert!(chords.contains("\\chord{E}"));
}

#[test]
fn test_bad_config_is_reported() {
    let dir = tempdir().unwrap();
    let config_path = write_song(dir.path(), "chordtex.yaml", "transpose: [1\n");
    assert!(matches!(Config::load(&config_path).unwrap_err(), CliError::Config { .. }));
}

#[test]
fn test_transpose_file() {
    let dir = tempdir().unwrap();
    let input = write_song(dir.path(), "grace.txt", GOOD);
    let text = transpose_file(&input, -2, Accidental::Flat).unwrap();
    assert_eq!(text, "title: Amazing Grace\n\nverse 1:\nF C F\nAmazing grace\n");
}

#[test]
fn test_failed_write_leaves_no_partial_output() {
    let dir = tempdir().unwrap();
    let input = write_song(dir.path(), "grace.txt", GOOD);
    fs::create_dir(dir.path().join("grace.slides.tex")).unwrap();

    let err = convert_file(&input, None, Targets::from_flags(false, false), &ConvertOptions::default()).unwrap_err();
    match err {
        CliError::Write { path, .. } => assert_eq!(path, dir.path().join("grace.slides.tex")),
        other => panic!("expected a write error, got {:?}", other),
    }
    assert!(!dir.path().join("grace.chords.tex").exists());

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["grace.slides.tex", "grace.txt"]);
}

#[test]
fn test_rerun_after_failed_write_succeeds() {
    let dir = tempdir().unwrap();
    let input = write_song(dir.path(), "grace.txt", GOOD);
    let blocker = dir.path().join("grace.slides.tex");
    fs::create_dir(&blocker).unwrap();
    assert!(convert_file(&input, None, Targets::from_flags(false, false), &ConvertOptions::default()).is_err());

    fs::remove_dir(&blocker).unwrap();
    let written = convert_file(&input, None, Targets::from_flags(false, false), &ConvertOptions::default()).unwrap();
    assert_eq!(written.len(), 2);
    assert!(blocker.is_file());
}

#[test]
fn test_book_joins_songs_in_order() {
    let dir = tempdir().unwrap();
    let inputs = vec![
        write_song(dir.path(), "other.txt", OTHER),
        write_song(dir.path(), "broken.txt", BAD),
        write_song(dir.path(), "grace.txt", GOOD),
    ];
    let out = dir.path().join("book");

    let summary = convert_book(&inputs, "sunday", Some(&out), Targets::from_flags(false, false), &ConvertOptions::default());
    assert_eq!(summary.failed.len(), 1);
    assert!(matches!(&summary.failed[0], CliError::Convert { path, .. } if path == &inputs[1]));
    assert_eq!(summary.written, vec![out.join("sunday.chords.tex"), out.join("sunday.slides.tex")]);

    let chords = fs::read_to_string(out.join("sunday.chords.tex")).unwrap();
    let first = chords.find("\\songtitle{How Great}").unwrap();
    let second = chords.find("\\songtitle{Amazing Grace}").unwrap();
    assert!(first < second);
    assert!(!chords.contains("Broken"));

    let slides = fs::read_to_string(out.join("sunday.slides.tex")).unwrap();
    assert_eq!(
        slides,
        "\\songtitle{How Great}\n\\chorus{How great Thou art}\n\n\\songtitle{Amazing Grace}\n\\verse[~1]{Amazing grace}\n"
    );
    assert!(!out.join("other.chords.tex").exists());
}

#[test]
fn test_book_single_target() {
    let dir = tempdir().unwrap();
    let inputs = vec![write_song(dir.path(), "grace.txt", GOOD)];

    let summary = convert_book(&inputs, "book", Some(dir.path()), Targets::from_flags(true, false), &ConvertOptions::default());
    assert!(summary.is_success());
    assert_eq!(summary.written, vec![dir.path().join("book.chords.tex")]);
    assert!(!dir.path().join("book.slides.tex").exists());
}

#[test]
fn test_book_with_no_good_songs_writes_nothing() {
    let dir = tempdir().unwrap();
    let inputs = vec![write_song(dir.path(), "broken.txt", BAD), dir.path().join("missing.txt")];

    let summary = convert_book(&inputs, "empty", Some(dir.path()), Targets::from_flags(false, false), &ConvertOptions::default());
    assert_eq!(summary.failed.len(), 2);
    assert!(summary.written.is_empty());
    assert!(!dir.path().join("empty.chords.tex").exists());
    assert!(!dir.path().join("empty.slides.tex").exists());
}

#[test]
fn test_compile_book_titles_each_song_after_its_file() {
    let dir = tempdir().unwrap();
    let inputs = vec![
        write_song(dir.path(), "first.txt", "verse:\nOne\n"),
        write_song(dir.path(), "second.txt", "verse:\nTwo\n"),
    ];

    let book = compile_book(&inputs, &ConvertOptions::default());
    assert_eq!(book.songs, inputs);
    assert_eq!(
        book.compiled.slides,
        "\\songtitle{first}\n\\verse{One}\n\n\\songtitle{second}\n\\verse{Two}"
    );
}
