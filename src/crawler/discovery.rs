//! Link discovery on listing pages
//!
//! Listing markup varies between section templates, so article anchors are
//! located with an ordered chain of selectors. Every match is resolved
//! against the site's base URL, normalized, and kept only if it belongs to
//! the site and looks like an article. A run-wide [`DedupSet`] guarantees that
//! no URL is handed out twice, even when it appears on several listing pages.

use crate::config::SiteProfile;
use crate::url::{has_article_shape, matches_domain, normalize_parsed, site_domain};
use crate::{ConfigError, UrlError};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Normalized URLs already handed out during this run
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as seen; returns false if it was already present
    pub fn insert(&mut self, url: &Url) -> bool {
        self.seen.insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Extracts candidate article URLs from listing pages
#[derive(Debug)]
pub struct LinkDiscoverer {
    /// Anchor selectors, evaluated in order
    selectors: Vec<Selector>,

    base_url: Url,

    /// Domain that candidate hosts must belong to
    domain: String,

    article_suffixes: Vec<String>,
}

impl LinkDiscoverer {
    /// Compiles the listing selector chain of a site profile
    ///
    /// # Arguments
    ///
    /// * `site` - The site profile holding selectors and article suffixes
    /// * `base_url` - The URL relative links are resolved against
    pub fn new(site: &SiteProfile, base_url: Url) -> Result<Self, ConfigError> {
        let selectors = compile_selectors(&site.listing_selectors)?;
        let domain = site_domain(&base_url)
            .ok_or_else(|| ConfigError::InvalidUrl(format!("base_url '{}' has no host", base_url)))?;

        Ok(Self {
            selectors,
            base_url,
            domain,
            article_suffixes: site.article_suffixes.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Discovers article URLs in one listing page
    ///
    /// Selectors are applied in order and matches are taken in document
    /// order. URLs already present in `seen` are skipped, and every accepted
    /// URL is added to it. An empty result is not an error.
    ///
    /// # Example
    ///
    /// ```
    /// use clickbait_scraper::config::SiteProfile;
    /// use clickbait_scraper::crawler::{DedupSet, LinkDiscoverer};
    /// use url::Url;
    ///
    /// let base = Url::parse("https://www.example.com").unwrap();
    /// let discoverer = LinkDiscoverer::new(&SiteProfile::default(), base).unwrap();
    ///
    /// let html = r#"<h2><a href="/news/article-1/Story.html">Story</a></h2>"#;
    /// let mut seen = DedupSet::new();
    /// let urls = discoverer.discover(html, &mut seen);
    /// assert_eq!(urls[0].as_str(), "https://www.example.com/news/article-1/Story.html");
    /// ```
    pub fn discover(&self, html: &str, seen: &mut DedupSet) -> Vec<Url> {
        let document = Html::parse_document(html);
        let mut found = Vec::new();

        for selector in &self.selectors {
            for element in document.select(selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };

                let Some(url) = self.resolve_candidate(href) else {
                    continue;
                };

                if seen.insert(&url) {
                    found.push(url);
                }
            }
        }

        found
    }

    /// Resolves an href and applies the domain and article-shape filters
    fn resolve_candidate(&self, href: &str) -> Option<Url> {
        let absolute = resolve_link(href, &self.base_url)?;
        let url = match normalize_parsed(absolute) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!(%href, error = %e, "Dropping unnormalizable link");
                return None;
            }
        };

        if self.is_article_url(&url) {
            Some(url)
        } else {
            None
        }
    }

    /// Checks the domain and URL-shape heuristics for a resolved URL
    pub fn is_article_url(&self, url: &Url) -> bool {
        let same_site = url
            .host_str()
            .map_or(true, |host| matches_domain(&self.domain, host));

        same_site && has_article_shape(url, &self.article_suffixes)
    }
}

/// Compiles a list of CSS selectors, failing on the first invalid one
pub(crate) fn compile_selectors(selectors: &[String]) -> Result<Vec<Selector>, ConfigError> {
    selectors
        .iter()
        .map(|s| compile_selector(s))
        .collect()
}

pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - empty hrefs
/// - javascript:, mailto:, tel:, data: schemes
/// - fragment-only links
/// - invalid URLs
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    base_url.join(href).ok()
}

/// Parses a seed or base URL string
pub fn parse_seed(url: &str) -> Result<Url, UrlError> {
    let parsed = Url::parse(url.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlError::InvalidScheme(parsed.scheme().to_string()));
    }
    if parsed.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }
    Ok(parsed)
}
