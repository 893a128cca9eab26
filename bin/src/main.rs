//! candlewick CLI - aggregates trade ticks into OHLC candles.

use anyhow::{Context, Result};
use candlewick_lib::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "candlewick")]
#[command(about = "Aggregates trade ticks into OHLC candles", long_about = None)]
#[command(version)]
struct Cli {
    /// Input file of TICKER,PRICE,COUNT,TIMESTAMP records
    #[arg(short, long)]
    file: PathBuf,

    /// Directory for the candles_<minutes>min.<format> outputs
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Overall timeout in milliseconds
    #[arg(short, long, default_value = "5000")]
    timeout: u64,

    /// Comma-separated window spans (e.g. 5,30,240 or 5m,4h)
    #[arg(short, long, value_delimiter = ',', default_value = "5,30,240")]
    spans: Vec<WindowSpan>,

    /// Output format (csv or ndjson)
    #[arg(long, default_value = "csv")]
    format: OutputFormat,

    /// Write a header row to CSV outputs
    #[arg(long)]
    header: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only, no summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Installs the stderr subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = PipelineConfig {
        spans: cli.spans,
        output_dir: cli.output_dir,
        timeout: Duration::from_millis(cli.timeout),
        format: cli.format,
        csv_header: cli.header,
        ..PipelineConfig::default()
    };

    let pipeline = Pipeline::new(config).context("Invalid arguments")?;
    let summary = pipeline
        .run_files(&cli.file)
        .await
        .with_context(|| format!("Failed to aggregate {}", cli.file.display()))?;

    info!(lines = summary.lines_read, "pipeline finished");
    for span in &summary.spans {
        info!(window = %span.span, candles = span.candles_written, "span complete");
        if !cli.quiet {
            println!("{span}");
        }
    }

    Ok(())
}
