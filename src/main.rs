//! Sitewalk main entry point
//!
//! This is the command-line interface for the Sitewalk site mapper.

use clap::Parser;
use std::path::PathBuf;
use sitewalk::config::{load_config, validate, Config};
use sitewalk::crawler::crawl_site;
use sitewalk::output::{print_statistics, render, CrawlStatistics, OutputFormat};
use sitewalk::url::parse_seed;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Sitewalk: a site link and asset mapper
///
/// Sitewalk crawls a website from a seed URL, following links on the seed's
/// host and its subdomains, and prints every visited page with the links and
/// assets found on it.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A site link and asset mapper", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages fetched at the same time
    #[arg(long, value_name = "N")]
    max_concurrent_fetches: Option<u32>,

    /// Time allowed for a single page fetch, in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format for the sitemap
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print crawl statistics to stderr after the sitemap
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let seed = match parse_seed(&cli.seed) {
        Ok(seed) => seed,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let start_time = Instant::now();
    let sitemap = crawl_site(&config, &seed).await?;

    println!("{}", render(&sitemap, cli.format)?.trim_end());

    if cli.stats {
        print_statistics(&CrawlStatistics::from_sitemap(
            &sitemap,
            start_time.elapsed(),
        ));
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the sitemap.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
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

/// Loads the configuration file if given, then applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(max) = cli.max_concurrent_fetches {
        config.crawler.max_concurrent_fetches = max;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.fetch_timeout = timeout;
    }

    validate(&config)?;

    Ok(config)
}
