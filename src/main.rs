//! Kvartal main entry point
//!
//! This is the command-line interface for the Kvartal catalog scraper.

use anyhow::{Context, Result};
use clap::Parser;
use kvartal::config::{load_config_with_hash, validate, Config};
use kvartal::crawler::scrape;
use kvartal::output::{print_statistics, write_listings_json};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Kvartal: a real-estate catalog scraper
///
/// Kvartal walks a paginated classifieds catalog, follows every listing to
/// its detail page and writes the normalized listings as JSON.
#[derive(Parser, Debug)]
#[command(name = "kvartal")]
#[command(version)]
#[command(about = "A real-estate catalog scraper", long_about = None)]
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

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Write listings here instead of the configured output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Override the number of catalog pages to fetch
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(max_pages) = cli.max_pages {
        config.catalog.max_pages = max_pages;
        validate(&config).context("invalid --max-pages")?;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
    } else {
        handle_scrape(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kvartal=info,warn"),
            1 => EnvFilter::new("kvartal=debug,info"),
            2 => EnvFilter::new("kvartal=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config, config_hash: &str) {
    println!("=== Kvartal Dry Run ===\n");

    println!("Source: {}", config.name);
    println!("Config hash: {}", config_hash);

    println!("\nCatalog:");
    println!("  Seed URL: {}", config.catalog.seed_url);
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  Page parameter: {}", config.catalog.page_param);
    println!("  Max pages: {}", config.catalog.max_pages);
    println!("  Stop on empty page: {}", config.catalog.stop_on_empty_page);

    println!("\nSelectors:");
    println!("  Catalog entry: {}", config.selectors.catalog_entry);
    println!("  Detail link: {}", config.selectors.detail_link);
    println!("  Location: {}", config.selectors.location);
    println!("  Price: {}", config.selectors.price);
    println!(
        "  Features: {} / {}",
        config.selectors.feature_label, config.selectors.feature_value
    );

    println!("\nRetry:");
    println!("  Delay: {}s", config.retry.delay_secs);
    println!("  Max attempts: {}", config.retry.max_retries);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nOutput: {}", config.output.path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would fetch {} catalog page(s) starting at {}",
        config.catalog.max_pages, config.catalog.seed_url
    );
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config) -> Result<()> {
    let report = match scrape(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    let path = Path::new(&config.output.path);
    write_listings_json(path, &report)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(
        "Wrote {} listings to {}",
        report.listings.len(),
        path.display()
    );

    print_statistics(&report.source, &report.stats);

    Ok(())
}
