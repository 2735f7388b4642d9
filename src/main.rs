use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use wikicorpus::corpus::{generate_corpus, CorpusOptions};
use wikicorpus::pipeline::Pipeline;
use wikicorpus::tokenize::{TokenizerConfig, TokenizerKind};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "wikicorpus")]
#[command(about = "Generate an entity-normalized training corpus from a Wikipedia CirrusSearch dump")]
struct Cli {
    /// Wikipedia CirrusSearch dump file (.json.gz)
    cirrus_file: PathBuf,

    /// Output corpus file (.txt.bz2)
    out_file: PathBuf,

    /// Type of tokenizer
    #[arg(long, value_enum, default_value_t = TokenizerKind::Regexp)]
    tokenizer: TokenizerKind,

    /// Lowercase words
    #[arg(long)]
    lower: bool,

    /// Dictionary directory for the MeCab tokenizer
    #[arg(long)]
    mecab_dic: Option<PathBuf>,

    /// User dictionary for the MeCab tokenizer
    #[arg(long)]
    mecab_udic: Option<PathBuf>,

    /// Limit number of articles to write (for testing)
    #[arg(long)]
    limit: Option<u64>,

    /// Hide the progress spinner
    #[arg(long)]
    no_progress: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: Cli) -> Result<()> {
    let config = TokenizerConfig {
        kind: cli.tokenizer,
        lowercase: cli.lower,
        mecab_dic: cli.mecab_dic,
        mecab_udic: cli.mecab_udic,
    };
    let pipeline = Pipeline::from_config(&config)?;

    let options = CorpusOptions {
        limit: cli.limit,
        progress: !cli.no_progress,
    };

    let start = Instant::now();
    let stats = generate_corpus(&cli.cirrus_file, &cli.out_file, &pipeline, &options)?;
    let duration = start.elapsed();
    info!(duration_secs = duration.as_secs_f64(), "Corpus generation complete");

    println!();
    println!("=== Summary ===");
    println!("Tokenizer:          {}", pipeline.tokenizer_name());
    println!("Total time:         {:.2}s", duration.as_secs_f64());
    println!();
    println!("Lines read:         {}", stats.lines_read);
    println!("Articles written:   {}", stats.articles());
    println!("Untitled skipped:   {}", stats.untitled_skipped);
    println!("Malformed skipped:  {}", stats.malformed_skipped);
    println!("Anchors collected:  {}", stats.anchors_collected);
    println!("Anchors masked:     {}", stats.anchors_masked);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    match run(cli) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
