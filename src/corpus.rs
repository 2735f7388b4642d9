//! Streaming batch driver: dump lines in, one corpus line per article out.
//!
//! Articles are handled strictly one after another; neither the input nor
//! the output is ever held in memory as a whole. Compression is picked from
//! the file extension on both sides (`.gz`, `.bz2`, anything else is plain).

use crate::config::{PROGRESS_INTERVAL, READ_BUFFER_SIZE, TMP_SUFFIX, WRITE_BUFFER_SIZE};
use crate::models::Article;
use crate::pipeline::Pipeline;
use crate::stats::CorpusStats;
use anyhow::{Context, Result};
use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    Gzip,
    Bzip2,
    Plain,
}

impl Compression {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => Compression::Gzip,
            Some("bz2") => Compression::Bzip2,
            _ => Compression::Plain,
        }
    }
}

/// Output sink that knows how to finish its compression stream.
pub enum CorpusWriter {
    Gzip(GzEncoder<BufWriter<File>>),
    Bzip2(BzEncoder<BufWriter<File>>),
    Plain(BufWriter<File>),
}

impl CorpusWriter {
    pub fn create(path: &Path, compression_hint: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {:?}", path))?;
        let buffered = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

        Ok(match Compression::from_path(compression_hint) {
            Compression::Gzip => {
                CorpusWriter::Gzip(GzEncoder::new(buffered, flate2::Compression::default()))
            }
            Compression::Bzip2 => {
                CorpusWriter::Bzip2(BzEncoder::new(buffered, bzip2::Compression::default()))
            }
            Compression::Plain => CorpusWriter::Plain(buffered),
        })
    }

    /// Flushes the compressed trailer and the underlying buffer.
    pub fn finish(self) -> Result<()> {
        let mut inner = match self {
            CorpusWriter::Gzip(enc) => enc.finish().context("Failed to finish gzip stream")?,
            CorpusWriter::Bzip2(enc) => enc.finish().context("Failed to finish bzip2 stream")?,
            CorpusWriter::Plain(w) => w,
        };
        inner.flush().context("Failed to flush output")?;
        Ok(())
    }
}

impl Write for CorpusWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            CorpusWriter::Gzip(w) => w.write(buf),
            CorpusWriter::Bzip2(w) => w.write(buf),
            CorpusWriter::Plain(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            CorpusWriter::Gzip(w) => w.flush(),
            CorpusWriter::Bzip2(w) => w.flush(),
            CorpusWriter::Plain(w) => w.flush(),
        }
    }
}

/// Opens a dump file, decompressing by extension.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open input dump: {:?}", path))?;

    Ok(match Compression::from_path(path) {
        Compression::Gzip => Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiGzDecoder::new(file),
        )),
        Compression::Bzip2 => Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiBzDecoder::new(file),
        )),
        Compression::Plain => Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)),
    })
}

/// `<path>.tmp`, the file written while a run is in progress.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(TMP_SUFFIX);
    PathBuf::from(name)
}

#[derive(Debug, Clone, Default)]
pub struct CorpusOptions {
    /// Stop after this many articles were written
    pub limit: Option<u64>,
    /// Draw a terminal spinner
    pub progress: bool,
}

/// Processes `input` into `output`. The output only appears at its final
/// path when the whole run succeeded.
pub fn generate_corpus(
    input: &Path,
    output: &Path,
    pipeline: &Pipeline,
    options: &CorpusOptions,
) -> Result<CorpusStats> {
    let reader = open_input(input)?;
    let tmp = tmp_path(output);
    let mut writer = CorpusWriter::create(&tmp, output)?;

    info!(input = ?input, output = ?output, "Generating corpus");

    let result = run(reader, &mut writer, pipeline, options).and_then(|stats| {
        writer.finish()?;
        fs::rename(&tmp, output)
            .with_context(|| format!("Failed to move {:?} into place at {:?}", tmp, output))?;
        Ok(stats)
    });

    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            debug!(error = %e, path = ?tmp, "Could not remove partial output");
        }
    }
    result
}

/// Streams dump lines from `reader`, writing one line per titled article.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    pipeline: &Pipeline,
    options: &CorpusOptions,
) -> Result<CorpusStats> {
    let mut stats = CorpusStats::new();
    let pb = if options.progress {
        make_spinner()
    } else {
        ProgressBar::hidden()
    };

    for (line_no, line) in reader.lines().enumerate() {
        if options.limit.is_some_and(|limit| stats.articles() >= limit) {
            debug!(limit = ?options.limit, "Article limit reached");
            break;
        }

        let line = line.with_context(|| format!("Failed to read input line {}", line_no + 1))?;
        stats.inc_lines();
        if line.trim().is_empty() {
            continue;
        }

        let article: Article = match serde_json::from_str(&line) {
            Ok(a) => a,
            Err(e) => {
                warn!(line = line_no + 1, error = %e, "Skipping undecodable record");
                stats.inc_malformed();
                continue;
            }
        };

        let Some(processed) = pipeline.process(&article)? else {
            stats.inc_untitled();
            continue;
        };

        writeln!(writer, "{}", processed.line).context("Failed to write corpus line")?;
        stats.add_anchors(processed.anchors, processed.masked);

        let n = stats.inc_articles();
        pb.inc(1);
        if n % PROGRESS_INTERVAL == 0 {
            info!(processed = n, "Progress");
        }
    }

    if stats.articles() % PROGRESS_INTERVAL != 0 {
        info!(processed = stats.articles(), "Progress");
    }
    pb.finish_and_clear();

    Ok(stats)
}

fn make_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {pos} articles ({per_sec}) {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
