/// Babble — trains a bigram model from a CSV of tweets and prints new ones.
///
/// Usage: babble --input <tweets.csv> [--config <babble.ron>] [--column <n>]
///               [--count <n>] [--seed <n>] [--min-words <n>]
///               [--output <file>] [--append] [--dump-model]
use std::path::PathBuf;
use std::process::ExitCode;

use babble_engine::config::BabbleConfig;
use babble_engine::core::pipeline::{Babbler, PipelineError};
use babble_engine::text::files::write_lines;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Generate tweet-like sentences from a bigram Markov chain.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file containing the training tweets.
    #[arg(long)]
    input: PathBuf,

    /// RON config file; command line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Zero-indexed CSV column holding the tweet text.
    #[arg(long)]
    column: Option<usize>,

    /// Number of sentences to generate.
    #[arg(long)]
    count: Option<usize>,

    /// PRNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Discard walks shorter than this many words.
    #[arg(long)]
    min_words: Option<usize>,

    /// Write sentences to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Append to the output file rather than truncating it.
    #[arg(long, requires = "output")]
    append: bool,

    /// Print the trained model before generating.
    #[arg(long)]
    dump_model: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), PipelineError> {
    let mut config = match args.config {
        Some(ref path) => {
            let config = BabbleConfig::load_from_ron(path)?;
            tracing::info!(path = %path.display(), "loaded config");
            config
        }
        None => BabbleConfig::default(),
    };
    if let Some(column) = args.column {
        config.column = column;
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(min_words) = args.min_words {
        config.min_words = min_words;
    }
    config.validate()?;

    let mut babbler = Babbler::builder()
        .with_csv_file(&args.input, config.column)?
        .config(&config)
        .build()?;

    if args.dump_model {
        print!("{}", babbler.model());
    }

    let sentences = babbler.babble_sentences(config.count)?;
    match args.output {
        Some(ref path) => {
            write_lines(&sentences, path, args.append)?;
            tracing::info!(
                count = sentences.len(),
                path = %path.display(),
                "wrote sentences"
            );
        }
        None => {
            for sentence in &sentences {
                println!("{}", sentence);
            }
        }
    }
    Ok(())
}
