//! Clickbait-Scraper main entry point
//!
//! This is the command-line interface for the Clickbait-Scraper article harvester.

use clap::Parser;
use clickbait_scraper::config::{resolve_config, Config, ConfigOverrides};
use clickbait_scraper::crawler::{parse_seed, run_crawl};
use clickbait_scraper::output::{print_summary, WriteMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Clickbait-Scraper: a polite single-site article harvester
///
/// Crawls news listing pages, follows article links, and writes
/// `headline,article,url` rows to a CSV file. Requests are made one at a
/// time with a politeness delay between them.
#[derive(Parser, Debug)]
#[command(name = "clickbait-scraper")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-site article harvester", long_about = None)]
struct Cli {
    /// Listing pages to discover articles on
    #[arg(long, value_name = "URL", num_args = 1.., required = true)]
    start_urls: Vec<String>,

    /// CSV file to write records to
    #[arg(long, value_name = "PATH", default_value = "data/raw/dailymail.csv")]
    out: PathBuf,

    /// Stop after this many candidate articles
    #[arg(long, value_name = "N")]
    max_articles: Option<usize>,

    /// Seconds to wait between requests [default: 1.0]
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Request timeout in seconds [default: 15.0]
    #[arg(long, value_name = "SECS")]
    timeout: Option<f64>,

    /// Append to the output file instead of overwriting it
    #[arg(long)]
    append: bool,

    /// Path to a TOML site profile
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip URLs disallowed by robots.txt and honor its Crawl-delay
    #[arg(long)]
    respect_robots: bool,

    /// Show the resolved configuration without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            delay_secs: self.delay,
            timeout_secs: self.timeout,
            max_articles: self.max_articles,
            respect_robots_txt: self.respect_robots.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let (config, config_hash) = match resolve_config(cli.config.as_deref(), &cli.overrides()) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    if let (Some(path), Some(hash)) = (&cli.config, &config_hash) {
        tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
    }

    let seeds = cli
        .start_urls
        .iter()
        .map(|s| parse_seed(s))
        .collect::<Result<Vec<_>, _>>()?;

    if cli.dry_run {
        handle_dry_run(&config, &seeds, &cli);
        return Ok(());
    }

    handle_crawl(config, &seeds, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("clickbait_scraper=info,warn"),
            1 => EnvFilter::new("clickbait_scraper=debug,info"),
            2 => EnvFilter::new("clickbait_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, seeds: &[Url], cli: &Cli) {
    println!("=== Clickbait-Scraper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Delay: {}s", config.crawler.delay_secs);
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    match config.crawler.max_articles {
        Some(max) => println!("  Max articles: {}", max),
        None => println!("  Max articles: unlimited"),
    }
    println!("  Respect robots.txt: {}", config.crawler.respect_robots_txt);

    println!("\nHeaders:");
    for (name, value) in config.headers.iter() {
        println!("  {}: {}", name, value);
    }

    let site = &config.site;
    println!("\nSite Profile:");
    println!("  Listing selectors: {}", site.listing_selectors.join(" | "));
    println!("  Article suffixes: {}", site.article_suffixes.join(" "));
    println!("  Headline selectors: {}", site.headline_selectors.join(" | "));
    println!("  Body containers: {}", site.body_containers.join(" | "));
    println!("  Paragraph selector: {}", site.paragraph_selector);
    println!("  Boilerplate markers: {}", site.boilerplate_markers.join(" | "));

    println!("\nOutput:");
    println!(
        "  {} ({})",
        cli.out.display(),
        if cli.append { "append" } else { "overwrite" }
    );

    println!("\nListing Pages ({}):", seeds.len());
    for seed in seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    seeds: &[Url],
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Crawling {} listing page(s) on {}",
        seeds.len(),
        config.crawler.base_url
    );

    let mode = WriteMode::from_append_flag(cli.append);
    match run_crawl(config, seeds, &cli.out, mode).await {
        Ok(summary) => {
            if !cli.quiet {
                print_summary(&summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
