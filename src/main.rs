//! Pagesift main entry point
//!
//! This is the command-line interface for the pagesift crawl-to-search
//! pipeline.

use clap::Parser;
use pagesift::config::load_config_with_hash;
use pagesift::crawler::crawl;
use pagesift::index::build_index;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagesift: crawl seed websites and build a full-text search index
///
/// By default a run crawls the configured entry points, writes the session's
/// artifact file, and then rebuilds the search index from every artifact in
/// the data directory.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version = "1.0.0")]
#[command(about = "Crawl websites and build a full-text search index", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Crawl and write artifacts without rebuilding the index
    #[arg(long, conflicts_with = "index_only")]
    crawl_only: bool,

    /// Rebuild the index from existing artifacts without crawling
    #[arg(long, conflicts_with = "crawl_only")]
    index_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if !cli.index_only {
        handle_crawl(&config).await?;
    }

    if !cli.crawl_only {
        handle_index(&config)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesift=info,warn"),
            1 => EnvFilter::new("pagesift=debug,info"),
            2 => EnvFilter::new("pagesift=trace,debug"),
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

/// Handles the crawl phase
async fn handle_crawl(config: &pagesift::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: {} entry points, max depth {}",
        config.crawler.entry_points.len(),
        config.crawler.max_depth
    );

    match crawl(config).await {
        Ok(report) => {
            match &report.artifact {
                Some(path) => tracing::info!(
                    "Crawl finished: {} pages recorded to {}",
                    report.pages_crawled,
                    path.display()
                ),
                None => tracing::warn!("Crawl finished without recording any pages"),
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the index rebuild phase
///
/// Pipeline errors propagate to the caller so the process exits non-zero;
/// they are never just logged and dropped here.
fn handle_index(config: &pagesift::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Rebuilding index at {} from {}",
        config.output.index_path,
        config.output.data_dir
    );

    match build_index(&config.output) {
        Ok(count) => {
            tracing::info!("Index rebuilt with {} documents", count);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Index rebuild failed: {}", e);
            Err(e.into())
        }
    }
}
