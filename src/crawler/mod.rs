//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - Article link discovery on listing pages
//! - Headline and body extraction from article pages
//! - Politeness throttling
//! - Overall crawl coordination

mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod throttle;

pub use coordinator::{run_crawl, Coordinator, SkipReason};
pub use discovery::{parse_seed, DedupSet, LinkDiscoverer};
pub use extractor::{ArticleRecord, ContentExtractor, ExtractionIncomplete};
pub use fetcher::{build_http_client, fetch_url, FetchFailure, FetchResult, HttpFetcher, PageFetcher};
pub use throttle::{effective_delay, Throttle};

pub use crate::output::CrawlSummary;

pub(crate) use discovery::compile_selector;
