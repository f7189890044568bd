//! Converts a saved ranking report into a Cosense table

use anyhow::{Context, Result};
use clap::Parser;
use cosense_ranker::config::{load_config, Config};
use cosense_ranker::output::convert_file;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert a cosense-ranker report into a pasteable Cosense table
#[derive(Parser, Debug)]
#[command(name = "convert-ranking")]
#[command(version)]
struct Cli {
    /// Saved ranking report [default: output.report-path, "result.txt"]
    input: Option<PathBuf>,

    /// Table file to write [default: output.table-path, "cosense.txt"]
    output: Option<PathBuf>,

    /// TOML configuration file supplying the default paths
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    let input = cli
        .input
        .unwrap_or_else(|| PathBuf::from(&config.output.report_path));
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.table_path));

    println!("📁 Input file: {}", input.display());
    println!("📝 Output file: {}", output.display());
    println!();

    tracing::info!("Converting {} to {}", input.display(), output.display());
    let conversion = convert_file(&input, &output)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!("✅ Saved converted table to {}", output.display());
    println!("📊 Entries converted: {}", conversion.rows.len());

    let (preview, remaining) = conversion.preview();
    println!();
    println!("📋 Preview (first {} lines):", preview.len());
    println!("{}", "-".repeat(40));
    for line in preview {
        println!("{}", line);
    }
    if remaining > 0 {
        println!("... ({} more lines)", remaining);
    }

    Ok(())
}

/// Logs go to stderr so the preview on stdout stays clean
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("cosense_ranker=debug,convert_ranking=debug,info"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
