//! cosense-ranker main entry point
//!
//! This is the command-line interface for the Cosense comment ranker.

use clap::Parser;
use cosense_ranker::config::{load_config_with_hash, load_session_id, Config};
use cosense_ranker::output::ConsoleProgress;
use cosense_ranker::store::PageFailure;
use cosense_ranker::{Analyzer, CosenseClient, RankerError, RunContext, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// cosense-ranker: comment leaderboards for Cosense hub pages
///
/// Fetches a hub page, follows every page it links to and ranks users by the
/// `[username.icon]` markers found there. Set COSENSE_SID (or put it in .env)
/// to read private projects.
#[derive(Parser, Debug)]
#[command(name = "cosense-ranker")]
#[command(version)]
#[command(about = "Comment leaderboards for Cosense hub pages", long_about = None)]
struct Cli {
    /// Hub page to analyze, as PROJECT/PAGE
    #[arg(long, value_name = "PROJECT/PAGE")]
    page: Option<String>,

    /// Only follow links whose name or project contains this text
    #[arg(long)]
    keyword: Option<String>,

    /// Show a per-page breakdown for this user instead of the ranking
    #[arg(long, value_name = "NAME")]
    username: Option<String>,

    /// Analyze only the first link
    #[arg(long)]
    first: bool,

    /// Check that every linked page has real content
    #[arg(long)]
    check_links: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    dotenvy::dotenv().ok();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), RankerError> {
    let options = RunOptions {
        keyword: cli.keyword,
        username: cli.username,
        first_only: cli.first,
        check_links: cli.check_links,
    };
    let context = RunContext::new(cli.page.as_deref(), options)?;

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let session_id = load_session_id();
    let client = CosenseClient::new(&config.api, session_id.as_deref())?;
    let progress = ConsoleProgress::new();

    Analyzer::new(&client, &config, &context)
        .with_progress(&progress)
        .with_config_hash(config_hash.as_deref())
        .run(&mut std::io::stdout())
        .await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cosense_ranker=info,warn"),
            1 => EnvFilter::new("cosense_ranker=debug,info"),
            2 => EnvFilter::new("cosense_ranker=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints a human-readable explanation for a fatal error
fn report_error(error: &RankerError) {
    match error {
        RankerError::MissingPageFlag => {
            println!("❌ Error: no page specified");
            println!();
            print_usage();
        }
        RankerError::InvalidPageSpec { spec } => {
            println!("❌ Invalid format: {}", spec);
            println!("   Format: PROJECT/PAGE (e.g. yasulab/README)");
        }
        RankerError::MissingLinksField { .. } => {
            println!("❌ Error: the API response has no links field");
            println!("   This page may not support link aggregation");
        }
        RankerError::HubFetch { page, failure } => report_hub_failure(page, failure),
        other => println!("❌ {}", other),
    }
}

fn report_hub_failure(page: &str, failure: &PageFailure) {
    match failure {
        PageFailure::AuthExpired => {
            println!("❌ Authentication error: the cookie is invalid or expired");
            println!("  → Update COSENSE_SID with a fresh connect.sid cookie");
        }
        PageFailure::AuthRequired => {
            println!("❌ Access denied: this page is private");
            println!("  → Set COSENSE_SID if authentication is required");
        }
        PageFailure::PageNotFound => println!("❌ Page not found: {}", page),
        PageFailure::OtherHttpStatus { status_code, body } => {
            println!("❌ Error: HTTP {} while fetching {}", status_code, page);
            if let Some(body) = body {
                println!("{}", body);
            }
        }
        PageFailure::NetworkFailure(_) | PageFailure::MalformedPayload(_) => {
            println!("❌ Failed to fetch {}: {}", page, failure);
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  cosense-ranker --page PROJECT/PAGE --keyword KEYWORD");
    println!();
    println!("Example:");
    println!("  cosense-ranker --page yasulab/README --keyword Ruby");
    println!();
    println!("See --help for details");
}
