//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured header set and timeout
//! - GET requests to fetch page markup
//! - Error classification into [`FetchFailure`] values
//!
//! Fetch failures are values, not errors: the caller decides what to do with
//! them. No retries or caching happen here.

use crate::config::{CrawlerConfig, HeaderConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use std::future::Future;
use thiserror::Error;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code (always 200)
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The request did not produce a usable page
    Failed(FetchFailure),
}

/// Why a fetch did not produce a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("HTTP status {status_code}")]
    HttpStatus { status_code: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("network error: {0}")]
    Network(String),
}

/// Anything that can turn a URL into page markup
///
/// The crawler is generic over this so tests can script responses.
pub trait PageFetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchResult>;
}

/// [`PageFetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the crawler configuration
    pub fn from_config(
        crawler: &CrawlerConfig,
        headers: &HeaderConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(crawler, headers)?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url.as_str()).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// Every configured header becomes a default header of the client. Headers
/// that are not valid on the wire are skipped; configuration validation
/// rejects them before a run starts.
///
/// # Example
///
/// ```no_run
/// use clickbait_scraper::config::Config;
/// use clickbait_scraper::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.headers).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    headers: &HeaderConfig,
) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    for (name, value) in headers.iter() {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                default_headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid header"),
        }
    }

    Client::builder()
        .default_headers(default_headers)
        .timeout(crawler.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success |
/// | Any other status | HttpStatus |
/// | Timeout | Timeout |
/// | DNS failure, connection refused | Connect |
/// | Body read error, other transport errors | Network |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchResult::Failed(classify_error(&e)),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if status != StatusCode::OK {
        tracing::debug!(%url, status = status.as_u16(), "Non-200 response");
        return FetchResult::Failed(FetchFailure::HttpStatus {
            status_code: status.as_u16(),
        });
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::Failed(classify_error(&e)),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connect(e.to_string())
    } else {
        FetchFailure::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher(timeout_secs: f64) -> HttpFetcher {
        let mut config = Config::default();
        config.crawler.timeout_secs = timeout_secs;
        HttpFetcher::from_config(&config.crawler, &config.headers).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let config = Config::default();
        assert!(build_http_client(&config.crawler, &config.headers).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success_sends_configured_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.html"))
            .and(header_exists("accept-language"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/a.html", server.uri())).unwrap();
        match test_fetcher(5.0).fetch(&url).await {
            FetchResult::Success {
                status_code, body, ..
            } => {
                assert_eq!(status_code, 200);
                assert_eq!(body, "<p>hi</p>");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_200_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing.html", server.uri())).unwrap();
        let result = test_fetcher(5.0).fetch(&url).await;
        assert!(matches!(
            result,
            FetchResult::Failed(FetchFailure::HttpStatus { status_code: 404 })
        ));
    }

    #[tokio::test]
    async fn test_other_2xx_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/empty.html", server.uri())).unwrap();
        let result = test_fetcher(5.0).fetch(&url).await;
        assert!(matches!(
            result,
            FetchResult::Failed(FetchFailure::HttpStatus { status_code: 204 })
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/slow.html", server.uri())).unwrap();
        let result = test_fetcher(0.2).fetch(&url).await;
        assert!(matches!(result, FetchResult::Failed(FetchFailure::Timeout)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        // Nothing listens on port 9 of localhost in the test environment
        let url = Url::parse("http://127.0.0.1:9/a.html").unwrap();
        let result = test_fetcher(2.0).fetch(&url).await;
        assert!(matches!(result, FetchResult::Failed(_)));
    }
}
