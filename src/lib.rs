//! Clickbait-Scraper: a polite single-site article harvester
//!
//! This crate crawls listing pages of a news site, discovers article links,
//! extracts `(headline, article, url)` records from each article page, and
//! writes them to a CSV file consumed by the training pipeline.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Clickbait-Scraper operations
///
/// Only failures that stop a whole run end up here. Per-article problems are
/// reported as [`crawler::SkipReason`] values instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Errors raised by the record sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Cannot open output {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write record: {0}")]
    Write(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for sink operations
pub type SinkResult<T> = std::result::Result<T, SinkError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ArticleRecord, Coordinator, CrawlSummary};
pub use output::{CsvSink, RecordSink, WriteMode};
pub use url::normalize_url;
