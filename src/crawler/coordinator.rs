//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the other pieces together:
//! - Fetching robots.txt when it is respected
//! - Discovering candidates across every listing page
//! - Fetching and extracting each candidate, one at a time
//! - Writing records to the sink
//!
//! A failing candidate never stops the run. The only fatal errors are the
//! ones raised before the loop starts.

use crate::config::{validate, Config, DEFAULT_USER_AGENT};
use crate::crawler::discovery::{DedupSet, LinkDiscoverer};
use crate::crawler::extractor::{ArticleRecord, ContentExtractor, ExtractionIncomplete};
use crate::crawler::fetcher::{FetchFailure, FetchResult, HttpFetcher, PageFetcher};
use crate::crawler::throttle::{effective_delay, Throttle};
use crate::output::{CrawlSummary, CsvSink, RecordSink, WriteMode};
use crate::robots::{fetch_robots, RobotsRules};
use crate::{ConfigError, ScrapeError, SinkError};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use url::Url;

/// Why a candidate did not produce a record
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("fetch failed: {0}")]
    FetchFailed(#[from] FetchFailure),

    #[error("extraction incomplete: {0}")]
    ExtractionIncomplete(#[from] ExtractionIncomplete),

    #[error("disallowed by robots.txt")]
    RobotsDisallowed,

    #[error("sink write failed: {0}")]
    SinkWrite(#[from] SinkError),
}

/// Main crawler coordinator structure
pub struct Coordinator<F: PageFetcher> {
    config: Config,
    fetcher: F,
    discoverer: LinkDiscoverer,
    extractor: ContentExtractor,
    throttle: Throttle,

    /// Loaded once per run when robots.txt is respected
    robots: Option<RobotsRules>,

    user_agent: String,
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - Where page markup comes from
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - The configuration is invalid
    pub fn new(config: Config, fetcher: F) -> Result<Self, ScrapeError> {
        validate(&config)?;

        let base_url = Url::parse(&config.crawler.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("{}: {}", config.crawler.base_url, e))
        })?;

        let discoverer = LinkDiscoverer::new(&config.site, base_url)?;
        let extractor = ContentExtractor::new(&config.site)?;
        let throttle = Throttle::new(config.crawler.delay());
        let user_agent = config
            .headers
            .get("user-agent")
            .unwrap_or(DEFAULT_USER_AGENT)
            .to_string();

        Ok(Self {
            config,
            fetcher,
            discoverer,
            extractor,
            throttle,
            robots: None,
            user_agent,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the crawl over the given listing pages
    ///
    /// This is the core crawling logic that:
    /// 1. Loads robots.txt if it is respected
    /// 2. Discovers candidates on every seed page
    /// 3. Truncates to the max-articles cap
    /// 4. Fetches, extracts and records each candidate in discovery order
    pub async fn run<S: RecordSink>(&mut self, seeds: &[Url], sink: &mut S) -> CrawlSummary {
        let start_time = Instant::now();
        let mut summary = CrawlSummary::new();

        if self.config.crawler.respect_robots_txt {
            self.load_robots().await;
        }

        let mut candidates = self.discover_candidates(seeds, &mut summary).await;
        summary.candidates_discovered = candidates.len();

        if candidates.is_empty() {
            summary.elapsed = start_time.elapsed();
            return summary;
        }

        if let Some(max) = self.config.crawler.max_articles {
            if candidates.len() > max {
                tracing::info!(
                    discovered = candidates.len(),
                    max,
                    "Limiting run to max-articles"
                );
                candidates.truncate(max);
            }
        }

        let total = candidates.len();
        summary.candidates_attempted = total;
        tracing::info!(total, "Fetching candidate articles");

        for (i, url) in candidates.iter().enumerate() {
            let index = i + 1;
            match self.process_candidate(url, sink).await {
                Ok(record) => {
                    summary.articles_saved += 1;
                    tracing::info!(
                        url = %url,
                        outcome = "saved",
                        "[{}/{}] {}",
                        index,
                        total,
                        record.headline
                    );
                }
                Err(reason) => {
                    record_skip(&mut summary, &reason);
                    log_skip(url, index, total, &reason);
                }
            }
        }

        summary.elapsed = start_time.elapsed();
        tracing::info!(
            saved = summary.articles_saved,
            attempted = summary.candidates_attempted,
            "Crawl completed in {:?}",
            summary.elapsed
        );

        summary
    }

    /// Fetches robots.txt and applies its Crawl-delay
    async fn load_robots(&mut self) {
        self.throttle.wait().await;
        let robots = fetch_robots(&self.fetcher, self.discoverer.base_url()).await;
        self.throttle.record_request();

        let delay = effective_delay(self.throttle.delay(), robots.crawl_delay(&self.user_agent));
        if delay > self.throttle.delay() {
            tracing::info!(?delay, "Raising politeness delay to robots.txt Crawl-delay");
            self.throttle.raise_delay(delay);
        }

        self.robots = Some(robots);
    }

    /// Collects candidates from every seed page, in discovery order
    async fn discover_candidates(&mut self, seeds: &[Url], summary: &mut CrawlSummary) -> Vec<Url> {
        let mut seen = DedupSet::new();
        let mut candidates = Vec::new();

        for seed in seeds {
            summary.seed_pages += 1;

            if !self.robots_allows(seed) {
                summary.seed_failures += 1;
                tracing::warn!(url = %seed, "Listing page disallowed by robots.txt");
                continue;
            }

            match self.fetch_throttled(seed).await {
                FetchResult::Success { body, .. } => {
                    let found = self.discoverer.discover(&body, &mut seen);
                    tracing::info!(url = %seed, found = found.len(), "Scanned listing page");
                    candidates.extend(found);
                }
                FetchResult::Failed(reason) => {
                    summary.seed_failures += 1;
                    tracing::warn!(url = %seed, %reason, "Skipping listing page");
                }
            }
        }

        if seen.is_empty() {
            tracing::warn!(
                seeds = seeds.len(),
                "No candidate articles found on any listing page"
            );
        } else {
            tracing::debug!(unique = seen.len(), "Discovery finished");
        }

        candidates
    }

    /// Checks a URL against robots.txt when it is respected
    fn robots_allows(&self, url: &Url) -> bool {
        self.robots
            .as_ref()
            .map_or(true, |robots| robots.is_allowed(url, &self.user_agent))
    }

    /// Takes one candidate through fetch, extraction and the sink
    async fn process_candidate<S: RecordSink>(
        &mut self,
        url: &Url,
        sink: &mut S,
    ) -> Result<ArticleRecord, SkipReason> {
        if !self.robots_allows(url) {
            return Err(SkipReason::RobotsDisallowed);
        }

        let body = match self.fetch_throttled(url).await {
            FetchResult::Success { body, .. } => body,
            FetchResult::Failed(reason) => return Err(reason.into()),
        };

        let record = self.extractor.extract(&body, url)?;
        sink.write_record(&record)?;

        Ok(record)
    }

    /// Fetches a URL once the politeness delay has passed
    async fn fetch_throttled(&mut self, url: &Url) -> FetchResult {
        self.throttle.wait().await;
        let result = self.fetcher.fetch(url).await;
        self.throttle.record_request();

        if let FetchResult::Success { final_url, status_code, .. } = &result {
            if final_url != url.as_str() {
                tracing::debug!(url = %url, %final_url, "Followed redirect");
            }
            tracing::debug!(url = %url, status_code, "Fetched page");
        }

        result
    }
}

fn record_skip(summary: &mut CrawlSummary, reason: &SkipReason) {
    match reason {
        SkipReason::FetchFailed(_) => summary.fetch_failures += 1,
        SkipReason::ExtractionIncomplete(_) => summary.extraction_incomplete += 1,
        SkipReason::RobotsDisallowed => summary.robots_disallowed += 1,
        SkipReason::SinkWrite(_) => summary.sink_write_failures += 1,
    }
}

fn log_skip(url: &Url, index: usize, total: usize, reason: &SkipReason) {
    match reason {
        SkipReason::ExtractionIncomplete(_) | SkipReason::RobotsDisallowed => {
            tracing::info!(url = %url, outcome = "skipped", %reason, "[{}/{}] Skipped", index, total);
        }
        _ => {
            tracing::warn!(url = %url, outcome = "failed", %reason, "[{}/{}] Failed", index, total);
        }
    }
}

/// Runs the main crawl operation against the live site
///
/// Builds the HTTP fetcher, opens the CSV sink and runs a [`Coordinator`]
/// over the seed pages. Only client construction and opening the output
/// file can fail.
///
/// # Example
///
/// ```no_run
/// use clickbait_scraper::config::Config;
/// use clickbait_scraper::crawler::{parse_seed, run_crawl};
/// use clickbait_scraper::output::WriteMode;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seeds = vec![parse_seed("https://www.dailymail.co.uk/news/index.html")?];
/// let summary = run_crawl(
///     Config::default(),
///     &seeds,
///     Path::new("data/raw/dailymail.csv"),
///     WriteMode::Overwrite,
/// )
/// .await?;
/// println!("{} articles saved", summary.articles_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    seeds: &[Url],
    out_path: &Path,
    mode: WriteMode,
) -> Result<CrawlSummary, ScrapeError> {
    validate(&config)?;
    let fetcher = HttpFetcher::from_config(&config.crawler, &config.headers)?;
    let mut coordinator = Coordinator::new(config, fetcher)?;
    let mut sink = CsvSink::open(out_path, mode)?;

    tracing::info!(path = %out_path.display(), ?mode, "Writing records");
    Ok(coordinator.run(seeds, &mut sink).await)
}
