//! Configuration module for Clickbait-Scraper
//!
//! This module handles the built-in site profile, optional TOML configuration
//! files, command-line overrides, and validation.
//!
//! # Example
//!
//! ```no_run
//! use clickbait_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site.toml")).unwrap();
//! println!("Politeness delay: {}s", config.crawler.delay_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HeaderConfig, SiteProfile, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, resolve_config, ConfigOverrides,
};
pub use validation::validate;
