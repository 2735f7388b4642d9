//! End-to-end tests for the corpus generator.
//!
//! Tests build real compressed dump files (gzip or bzip2) in temp directories,
//! run [`generate_corpus`] on them and decode the compressed output again.
//!
//! # Sample Data
//!
//! `sample_dump()` mimics a CirrusSearch dump: bulk-index header lines
//! alternate with article documents. It contains
//! - "Tokyo" with a piped link whose anchor is absent from the body
//! - "New York City" with nested anchors ("New York" inside "New York City")
//! - "Mercury" with a disambiguated link target and a footnote caret
//! - one untitled document and one header line per article

use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wikicorpus::corpus::{generate_corpus, tmp_path, CorpusOptions};
use wikicorpus::pipeline::Pipeline;
use wikicorpus::tokenize::{TokenizerConfig, TokenizerKind};

fn sample_dump() -> &'static str {
    concat!(
        r#"{"index":{"_type":"page","_id":"1"}}"#,
        "\n",
        r#"{"title":"Tokyo","text":"Tokyo is a city.","source_text":"[[Tokyo]] is the capital. [[Japan|the country]]"}"#,
        "\n",
        r#"{"index":{"_type":"page","_id":"2"}}"#,
        "\n",
        r#"{"title":"New York City","text":"New York City is in\nNew York state.","source_text":"'''[[New York City]]''' lies in [[New York (state)|New York]]."}"#,
        "\n",
        r#"{"index":{"_type":"page","_id":"3"}}"#,
        "\n",
        r#"{"title":"Mercury","text":"Mercury orbits the Sun. ^ Note","source_text":"[[Mercury (planet)|Mercury]] orbits the [[Sun]]. [[Category:Planets]]"}"#,
        "\n",
        r#"{"text":"no title here"}"#,
        "\n",
    )
}

/// Helper: write `content` gzip-compressed into `dir/name`.
fn create_gz(dir: &Path, name: &str, content: &str) -> PathBuf {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(content.as_bytes()).unwrap();
    let path = dir.join(name);
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    path
}

/// Helper: write `content` bzip2-compressed into `dir/name`.
fn create_bz2(dir: &Path, name: &str, content: &str) -> PathBuf {
    let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::fast());
    encoder.write_all(content.as_bytes()).unwrap();
    let path = dir.join(name);
    fs::write(&path, encoder.finish().unwrap()).unwrap();
    path
}

fn read_bz2(path: &Path) -> String {
    let mut out = String::new();
    BzDecoder::new(fs::File::open(path).unwrap())
        .read_to_string(&mut out)
        .unwrap();
    out
}

fn read_gz(path: &Path) -> String {
    let mut out = String::new();
    GzDecoder::new(fs::File::open(path).unwrap())
        .read_to_string(&mut out)
        .unwrap();
    out
}

fn pipeline(kind: TokenizerKind, lowercase: bool) -> Pipeline {
    Pipeline::from_config(&TokenizerConfig {
        kind,
        lowercase,
        ..Default::default()
    })
    .unwrap()
}

fn quiet() -> CorpusOptions {
    CorpusOptions {
        limit: None,
        progress: false,
    }
}

// ---------------------------------------------------------------------------
// Regexp tokenizer
// ---------------------------------------------------------------------------

#[test]
fn gz_dump_to_bz2_corpus() {
    let dir = TempDir::new().unwrap();
    let input = create_gz(dir.path(), "dump.json.gz", sample_dump());
    let output = dir.path().join("corpus.txt.bz2");

    let stats = generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Regexp, false),
        &quiet(),
    )
    .unwrap();

    let corpus = read_bz2(&output);
    let lines: Vec<&str> = corpus.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Tokyo is a city .",
            "NewYorkCity is in NewYork state .",
            "Mercury orbits the Sun . Note",
        ]
    );

    assert_eq!(stats.lines_read, 7);
    assert_eq!(stats.articles(), 3);
    assert_eq!(stats.untitled_skipped, 4);
    assert_eq!(stats.malformed_skipped, 0);
}

#[test]
fn temp_file_is_renamed_on_success() {
    let dir = TempDir::new().unwrap();
    let input = create_gz(dir.path(), "dump.json.gz", sample_dump());
    let output = dir.path().join("corpus.txt.bz2");

    generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Regexp, false),
        &quiet(),
    )
    .unwrap();

    assert!(output.exists());
    assert!(!tmp_path(&output).exists());
}

#[test]
fn missing_input_is_fatal_and_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("corpus.txt.bz2");

    let result = generate_corpus(
        &dir.path().join("missing.json.gz"),
        &output,
        &pipeline(TokenizerKind::Regexp, false),
        &quiet(),
    );

    assert!(result.is_err());
    assert!(!output.exists());
    assert!(!tmp_path(&output).exists());
}

#[test]
fn corrupt_compressed_input_removes_partial_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dump.json.gz");
    fs::write(&input, b"definitely not gzip").unwrap();
    let output = dir.path().join("corpus.txt");

    let result = generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Regexp, false),
        &quiet(),
    );

    assert!(result.is_err());
    assert!(!output.exists());
    assert!(!tmp_path(&output).exists());
}

#[test]
fn bz2_input_and_plain_output() {
    let dir = TempDir::new().unwrap();
    let input = create_bz2(dir.path(), "dump.json.bz2", sample_dump());
    let output = dir.path().join("corpus.txt");

    let stats = generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Regexp, false),
        &quiet(),
    )
    .unwrap();

    let corpus = fs::read_to_string(&output).unwrap();
    assert_eq!(corpus.lines().count(), 3);
    assert_eq!(stats.articles(), 3);
}

#[test]
fn gz_output() {
    let dir = TempDir::new().unwrap();
    let input = create_gz(dir.path(), "dump.json.gz", sample_dump());
    let output = dir.path().join("corpus.txt.gz");

    generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Regexp, false),
        &quiet(),
    )
    .unwrap();

    assert!(read_gz(&output).starts_with("Tokyo is a city .\n"));
}

#[test]
fn lowercase_corpus() {
    let dir = TempDir::new().unwrap();
    let input = create_gz(dir.path(), "dump.json.gz", sample_dump());
    let output = dir.path().join("corpus.txt.bz2");

    generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Regexp, true),
        &quiet(),
    )
    .unwrap();

    let corpus = read_bz2(&output);
    assert_eq!(corpus.lines().next(), Some("tokyo is a city ."));
}

#[test]
fn limit_caps_written_articles() {
    let dir = TempDir::new().unwrap();
    let input = create_gz(dir.path(), "dump.json.gz", sample_dump());
    let output = dir.path().join("corpus.txt.bz2");

    let options = CorpusOptions {
        limit: Some(1),
        progress: false,
    };
    let stats = generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Regexp, false),
        &options,
    )
    .unwrap();

    assert_eq!(stats.articles(), 1);
    assert_eq!(read_bz2(&output), "Tokyo is a city .\n");
}

// ---------------------------------------------------------------------------
// Other tokenizer modes
// ---------------------------------------------------------------------------

#[test]
fn treebank_corpus() {
    let dir = TempDir::new().unwrap();
    let dump = r#"{"title":"Paris","text":"Paris's museums aren't small.","source_text":"[[Louvre]]"}"#;
    let input = create_gz(dir.path(), "dump.json.gz", dump);
    let output = dir.path().join("corpus.txt.bz2");

    generate_corpus(
        &input,
        &output,
        &pipeline(TokenizerKind::Nltk, false),
        &quiet(),
    )
    .unwrap();

    assert_eq!(read_bz2(&output), "Paris 's museums are n't small .\n");
}

#[cfg(not(feature = "mecab"))]
#[test]
fn char_mode_corpus() {
    let dir = TempDir::new().unwrap();
    let input = create_gz(dir.path(), "dump.json.gz", sample_dump());
    let word_out = dir.path().join("words.txt");
    let char_out = dir.path().join("chars.txt");

    generate_corpus(
        &input,
        &word_out,
        &pipeline(TokenizerKind::Regexp, false),
        &quiet(),
    )
    .unwrap();
    generate_corpus(
        &input,
        &char_out,
        &pipeline(TokenizerKind::Char, false),
        &quiet(),
    )
    .unwrap();

    let words = fs::read_to_string(&word_out).unwrap();
    let chars = fs::read_to_string(&char_out).unwrap();

    assert_eq!(chars.lines().next(), Some("T o k y o i s a c i t y ."));
    for (w, c) in words.lines().zip(chars.lines()) {
        assert!(c.split(' ').all(|t| t.chars().count() == 1));
        assert_eq!(c.replace(' ', ""), w.replace(' ', ""));
    }
}
