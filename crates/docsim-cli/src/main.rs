//! docsim - compare two text files by cosine similarity
//!
//! Ingests both files into term-frequency maps and writes the decimal
//! similarity score to the output destination.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use docsim_core::ingest::DEFAULT_BLOCK_SIZE;
use docsim_core::{cosine, Ingestor, Tokenizer};

/// Docsim: duplicate detection for mixed Chinese/English text files.
///
/// Computes the cosine similarity of the two input files' clause/word
/// frequency vectors and writes the score (a decimal in [0, 1]) to
/// OUTPUT.
#[derive(Parser, Debug)]
#[command(name = "docsim", version, about)]
struct Cli {
    /// The original document
    original: PathBuf,

    /// The document to compare against the original
    candidate: PathBuf,

    /// Where to write the score ("-" for stdout)
    output: PathBuf,

    /// File size in bytes at which ingestion switches to the
    /// bounded-memory streaming path
    #[arg(long, default_value_t = docsim_core::ingest::DEFAULT_SMALL_FILE_THRESHOLD)]
    threshold_bytes: u64,

    /// Write a JSON report instead of the bare decimal score
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    original: String,
    candidate: String,
    score: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("docsim=info")),
        )
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let ingestor = Ingestor::with_limits(Tokenizer::default(), cli.threshold_bytes, DEFAULT_BLOCK_SIZE);

    let original = ingestor.ingest(&cli.original)?;
    let candidate = ingestor.ingest(&cli.candidate)?;
    let score = cosine(&original, &candidate);

    info!(
        original_terms = original.len(),
        candidate_terms = candidate.len(),
        score,
        "comparison complete"
    );

    let rendered = if cli.json {
        let report = Report {
            original: cli.original.display().to_string(),
            candidate: cli.candidate.display().to_string(),
            score,
        };
        let mut json = serde_json::to_string(&report)?;
        json.push('\n');
        json
    } else {
        format!("{score}\n")
    };

    write_output(&cli.output, &rendered)
}

fn write_output(output: &Path, rendered: &str) -> Result<()> {
    if output == Path::new("-") {
        std::io::stdout()
            .write_all(rendered.as_bytes())
            .context("failed to write score to stdout")?;
    } else {
        std::fs::write(output, rendered)
            .with_context(|| format!("failed to write score to {}", output.display()))?;
    }
    Ok(())
}
