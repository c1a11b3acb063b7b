use url::Url;

/// Extracts the domain from a URL
///
/// Retrieves the host portion of a URL and converts it to lowercase.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use clickbait_scraper::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Derives the site domain that candidate links must belong to
///
/// The `www.` prefix of the base URL is dropped so that sibling subdomains
/// of the same site are accepted.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use clickbait_scraper::url::site_domain;
///
/// let base = Url::parse("https://www.dailymail.co.uk").unwrap();
/// assert_eq!(site_domain(&base), Some("dailymail.co.uk".to_string()));
/// ```
pub fn site_domain(base_url: &Url) -> Option<String> {
    extract_domain(base_url).map(|host| match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => host,
    })
}
