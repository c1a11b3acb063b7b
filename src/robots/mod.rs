//! Robots.txt handling module
//!
//! Off by default. When enabled, the crawler fetches the site's robots.txt
//! once per run, skips disallowed article URLs, and honors Crawl-delay.

mod parser;

pub use parser::RobotsRules;

use crate::crawler::{FetchResult, PageFetcher};
use url::Url;

/// Returns the robots.txt location for a site
pub fn robots_url(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    url.set_path("/robots.txt");
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Fetches robots.txt for the site behind `base_url`
///
/// Any fetch failure (missing file, server error, timeout) yields
/// [`RobotsRules::allow_all`].
pub async fn fetch_robots<F: PageFetcher>(fetcher: &F, base_url: &Url) -> RobotsRules {
    let url = robots_url(base_url);

    match fetcher.fetch(&url).await {
        FetchResult::Success { body, .. } => {
            tracing::debug!(%url, bytes = body.len(), "Fetched robots.txt");
            RobotsRules::from_content(&body)
        }
        FetchResult::Failed(reason) => {
            tracing::info!(%url, %reason, "No usable robots.txt, allowing all");
            RobotsRules::allow_all()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_url() {
        let base = Url::parse("https://www.example.com/news/index.html?x=1#top").unwrap();
        assert_eq!(
            robots_url(&base).as_str(),
            "https://www.example.com/robots.txt"
        );
    }

    #[test]
    fn test_robots_url_keeps_port() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(robots_url(&base).as_str(), "http://127.0.0.1:8080/robots.txt");
    }
}
