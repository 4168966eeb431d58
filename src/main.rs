//! isbn-harvest main entry point
//!
//! This is the command-line interface for the isbn-harvest metadata harvester.

use anyhow::Context;
use clap::Parser;
use isbn_harvest::config::{load_config_with_hash, Config};
use isbn_harvest::crawler::{crawl, plan_run};
use isbn_harvest::output::{generate_markdown_summary, ConsoleSink, ProgressSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// isbn-harvest: a quota-aware book metadata harvester
///
/// isbn-harvest scans a local book collection, searches a remote catalog
/// for every file, and stores the catalog's metadata and cover for each ISBN
/// found. Files finished in earlier runs are skipped, and the run stops at
/// the first rate-limit signal.
#[derive(Parser, Debug)]
#[command(name = "isbn-harvest")]
#[command(version)]
#[command(about = "A quota-aware book metadata harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (created with defaults if absent)
    #[arg(short, long, value_name = "PATH", default_value = "isbn-harvest.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show which files would be searched, and with which query, without any network access
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show counts of ledger entries, metadata records and covers, then exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Write a markdown report of the run to this path
    #[arg(long, value_name = "PATH", conflicts_with_all = ["dry_run", "stats"])]
    summary: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_crawl(&config, config_hash, cli.quiet, cli.summary).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("isbn_harvest=info,warn"),
            1 => EnvFilter::new("isbn_harvest=debug,info"),
            2 => EnvFilter::new("isbn_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: lists pending files and their queries
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== isbn-harvest Dry Run ===\n");

    println!("Paths:");
    println!("  Library: {}", config.paths.library_dir.display());
    println!("  Metadata: {}", config.paths.metadata_dir.display());
    println!("  Covers: {}", config.paths.covers_dir.display());
    println!("  Ledger: {}", config.paths.ledger_path.display());

    println!("\nCatalog:");
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  Max results: {}", config.catalog.max_results);
    println!("  Request delay: {}ms", config.catalog.request_delay_ms);

    let planned = plan_run(config).context("Failed to plan run")?;
    let (done, pending): (Vec<_>, Vec<_>) = planned.into_iter().partition(|p| p.done);

    println!("\nPending files ({}):", pending.len());
    for entry in &pending {
        println!("  - {}", entry.item.path.display());
        println!("    query: {}", entry.query);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ {} files already in the ledger", done.len());
    println!("✓ Would search {} files", pending.len());

    Ok(())
}

/// Handles the --stats mode: shows what is on disk
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use isbn_harvest::output::{load_statistics, print_statistics};

    let stats = load_statistics(config).context("Failed to load statistics")?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main harvest operation
async fn handle_crawl(
    config: &Config,
    config_hash: String,
    quiet: bool,
    summary_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let sink: Box<dyn ProgressSink> = if quiet {
        Box::new(ConsoleSink::quiet())
    } else {
        Box::new(ConsoleSink::new())
    };

    let summary = crawl(config, sink, Some(config_hash))
        .await
        .context("Harvest failed")?;

    if let Some(path) = summary_path {
        generate_markdown_summary(&summary, &path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
        tracing::info!("Summary written to {}", path.display());
    }

    if summary.quota_exhausted() {
        tracing::warn!("Stopped early: catalog quota exhausted; rerun later to continue");
    }

    Ok(())
}
