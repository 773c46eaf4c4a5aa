//! Folio-Crawl main entry point
//!
//! This is the command-line interface for the Folio-Crawl paginated content
//! crawler.

use anyhow::{Context, Result};
use clap::Parser;
use folio_crawl::config::{parse_config_with_hash, profile, validate, Config, PROFILE_NAMES};
use folio_crawl::crawler::crawl;
use folio_crawl::output::{print_statistics, write_records, CrawlStatistics};
use folio_crawl::{ConfigError, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Folio-Crawl: a paginated content crawler
///
/// Folio-Crawl walks a chain of list pages, fetches every linked item page,
/// extracts a title and content fragments from each, and writes the records
/// to an HTML or Markdown document, a CSV file, or a SQLite table.
#[derive(Parser, Debug)]
#[command(name = "folio-crawl")]
#[command(version)]
#[command(about = "A paginated content crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// First list page to fetch
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Stop after this many records
    #[arg(long, value_name = "N")]
    max_items: Option<usize>,

    /// Output file
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Output format (inferred from the output extension when omitted)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Built-in extraction profile (freefind, blogger, blogger-text)
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("folio_crawl=info,warn"),
            1 => EnvFilter::new("folio_crawl=debug,info"),
            2 => EnvFilter::new("folio_crawl=trace,debug"),
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

/// Loads the config file (if any), applies CLI overrides, and validates the result
fn load_effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = parse_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(name) = &cli.profile {
        config.extraction = profile(name).ok_or_else(|| {
            ConfigError::UnknownProfile(format!(
                "{} (available: {})",
                name,
                PROFILE_NAMES.join(", ")
            ))
        })?;
    }
    if let Some(start_url) = &cli.start_url {
        config.crawler.start_url = start_url.clone();
    }
    if let Some(max_items) = cli.max_items {
        config.crawler.max_items = Some(max_items);
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.timeout_secs = timeout;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = Some(format);
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Folio-Crawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Start URL: {}", config.crawler.start_url);
    match config.crawler.max_items {
        Some(cap) => println!("  Max items: {}", cap),
        None => println!("  Max items: unlimited"),
    }
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!(
        "  Max concurrent items: {}",
        config.crawler.max_concurrent_items
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nExtraction:");
    let extraction = &config.extraction;
    match &extraction.item_link_filter {
        Some(filter) => println!("  Item links: {} (containing \"{}\")", extraction.item_links, filter),
        None => println!("  Item links: {}", extraction.item_links),
    }
    match &extraction.next_page_text {
        Some(text) => println!("  Next page: {} (text \"{}\")", extraction.next_page, text),
        None => println!("  Next page: {}", extraction.next_page),
    }
    if extraction.title_from_url {
        println!("  Title: from URL");
    } else {
        println!("  Title: {}", extraction.title);
    }
    println!(
        "  Content: {} x{} ({:?})",
        extraction.content, extraction.content_count, extraction.content_mode
    );

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);
    if let Some(format) = config.output.effective_format() {
        println!("  Format: {}", format);
        if format == OutputFormat::Sqlite {
            println!("  Table: {}", config.output.table_name);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> Result<()> {
    let outcome = crawl(config).await.context("failed to start crawler")?;

    if outcome.stop_reason.is_abort() {
        tracing::warn!("Crawl ended early: {}", outcome.stop_reason);
    }

    println!("Total items scraped: {}", outcome.record_count());

    if outcome.records.is_empty() {
        println!("No records scraped.");
    } else {
        let format = write_records(&outcome.records, &config.output)
            .with_context(|| format!("failed to write {}", config.output.path))?;
        println!("✓ Wrote {} ({})", config.output.path, format);
    }

    println!();
    print_statistics(&CrawlStatistics::from_outcome(&outcome));

    Ok(())
}
