//! gb1: print the GB1 dataset info or stream the examples of one split as JSON lines.
//!
//! Run with: gb1 --help

use std::convert::TryFrom;
use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gb1::{BuilderConfig, DatasetBuilder, Gb1, Indexing, Record, Split};

#[derive(Parser)]
#[command(name = "gb1")]
#[command(author, version, about = "GB1 epistasis fitness dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print description, citation and feature schema as JSON
    Info,

    /// Write the examples of one split to stdout, one JSON object per line
    Generate {
        /// Split to generate (train or test)
        #[arg(value_parser = parse_split)]
        split: Split,

        /// Directory holding train/train.tsv and test/test.tsv
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path of the train file (overrides --data-dir)
        #[arg(long)]
        train: Option<PathBuf>,

        /// Path of the test file (overrides --data-dir)
        #[arg(long)]
        test: Option<PathBuf>,

        /// Variant positions count residues from 1 instead of 0
        #[arg(long)]
        one_based: bool,

        /// Fail if a variant's original residue disagrees with the wild type
        #[arg(long)]
        check_reference: bool,
    },
}

fn parse_split(s: &str) -> Result<Split, String> {
    Split::try_from(s).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct Line<'a> {
    key: usize,
    #[serde(flatten)]
    record: &'a Record,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Dataset(#[from] gb1::DatasetError),
    #[error("Failed to write output")]
    Output(#[from] io::Error),
    #[error("Failed to serialize output")]
    Json(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Info => {
            let info = Gb1::default().info();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &info)?;
            writeln!(out)?;
        }
        Commands::Generate {
            split,
            data_dir,
            train,
            test,
            one_based,
            check_reference,
        } => {
            let mut config = BuilderConfig::default();
            if let Some(dir) = data_dir {
                config = config.with_data_dir(dir);
            }
            if let Some(path) = train {
                config = config.with_train_file(path);
            }
            if let Some(path) = test {
                config = config.with_test_file(path);
            }
            let indexing = if one_based {
                Indexing::OneBased
            } else {
                Indexing::ZeroBased
            };
            config = config
                .with_indexing(indexing)
                .with_reference_check(check_reference);

            let gb1 = Gb1::new(config);
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            gb1.generate_examples(gb1.config().file(split), log::logger(), |key, record| {
                serde_json::to_writer(&mut out, &Line { key, record: &record })?;
                writeln!(out)?;
                Ok::<(), CliError>(())
            })?;
            out.flush()?;
        }
    }
    Ok(())
}
