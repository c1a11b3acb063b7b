use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.dailymail.co.uk";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/125.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Main configuration structure for Clickbait-Scraper
///
/// Every table is optional in the TOML file; missing values fall back to the
/// built-in DailyMail profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,

    /// HTTP headers sent with every request
    pub headers: HeaderConfig,

    pub site: SiteProfile,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Base URL that relative links are resolved against; its host defines
    /// the crawled domain
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Pause between consecutive requests (seconds)
    #[serde(rename = "delay-secs")]
    pub delay_secs: f64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: f64,

    /// Maximum number of articles to fetch per run
    #[serde(rename = "max-articles")]
    pub max_articles: Option<usize>,

    /// Honor robots.txt Disallow rules and Crawl-delay
    #[serde(rename = "respect-robots-txt")]
    pub respect_robots_txt: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delay_secs: 1.0,
            timeout_secs: 15.0,
            max_articles: None,
            respect_robots_txt: false,
        }
    }
}

impl CrawlerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}

/// Header set applied to the HTTP client
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct HeaderConfig(pub BTreeMap<String, String>);

impl Default for HeaderConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
        headers.insert(
            "Accept-Language".to_string(),
            DEFAULT_ACCEPT_LANGUAGE.to_string(),
        );
        Self(headers)
    }
}

impl HeaderConfig {
    /// Looks up a header by case-insensitive name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// Selector chains and heuristics describing one site's markup
///
/// All chains are evaluated in order. The defaults reflect the template
/// variants observed on DailyMail.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Selectors matching article anchors on listing pages
    #[serde(rename = "listing-selectors")]
    pub listing_selectors: Vec<String>,

    /// Path suffixes that identify an article page
    #[serde(rename = "article-suffixes")]
    pub article_suffixes: Vec<String>,

    /// Headline rules, most specific first
    #[serde(rename = "headline-selectors")]
    pub headline_selectors: Vec<String>,

    /// Regions that hold the article body
    #[serde(rename = "body-containers")]
    pub body_containers: Vec<String>,

    #[serde(rename = "paragraph-selector")]
    pub paragraph_selector: String,

    /// Substrings marking boilerplate paragraphs in the full-page fallback
    #[serde(rename = "boilerplate-markers")]
    pub boilerplate_markers: Vec<String>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            listing_selectors: strings(&[
                "a.article a",
                "a.linkro-darkred",
                "a.js-headline-text",
                "a.gotham-bold",
                "h2 a",
            ]),
            article_suffixes: strings(&[".html"]),
            headline_selectors: strings(&[
                "h2.linkro-darkred",
                "h2[itemprop=\"headline\"]",
                "h1[itemprop=\"headline\"]",
                "h1",
                "title",
            ]),
            body_containers: strings(&["#js-article-text", ".article-text", ".mol-para-with-font"]),
            paragraph_selector: "p".to_string(),
            boilerplate_markers: strings(&["Follow Daily Mail", "e-mail"]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
