use crate::config::types::{Config, CrawlerConfig, HeaderConfig, SiteProfile};
use crate::ConfigError;
use crate::crawler::compile_selector;
use reqwest::header::{HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_headers(&config.headers)?;
    validate_site_profile(&config.site)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !config.delay_secs.is_finite()
        || config.delay_secs < 0.0
        || Duration::try_from_secs_f64(config.delay_secs).is_err()
    {
        return Err(ConfigError::Validation(format!(
            "delay_secs must be a finite number >= 0, got {}",
            config.delay_secs
        )));
    }

    if !config.timeout_secs.is_finite()
        || config.timeout_secs <= 0.0
        || Duration::try_from_secs_f64(config.timeout_secs).is_err()
    {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be a finite number > 0, got {}",
            config.timeout_secs
        )));
    }

    if config.max_articles == Some(0) {
        return Err(ConfigError::Validation(
            "max_articles must be >= 1 when set".to_string(),
        ));
    }

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates that every header is legal on the wire
fn validate_headers(headers: &HeaderConfig) -> Result<(), ConfigError> {
    for (name, value) in headers.iter() {
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ConfigError::Validation(format!("Invalid header name '{}'", name))
        })?;
        HeaderValue::from_str(value).map_err(|_| {
            ConfigError::Validation(format!("Invalid value for header '{}'", name))
        })?;
    }
    Ok(())
}

/// Validates the selector chains of a site profile
fn validate_site_profile(site: &SiteProfile) -> Result<(), ConfigError> {
    require_non_empty("listing_selectors", &site.listing_selectors)?;
    require_non_empty("article_suffixes", &site.article_suffixes)?;
    require_non_empty("headline_selectors", &site.headline_selectors)?;

    if site.article_suffixes.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::Validation(
            "article_suffixes cannot contain an empty suffix".to_string(),
        ));
    }

    for selector in site
        .listing_selectors
        .iter()
        .chain(&site.headline_selectors)
        .chain(&site.body_containers)
        .chain(std::iter::once(&site.paragraph_selector))
    {
        compile_selector(selector)?;
    }

    Ok(())
}

fn require_non_empty(field: &str, values: &[String]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must contain at least one entry",
            field
        )));
    }
    Ok(())
}
