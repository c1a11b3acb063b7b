use url::Url;

/// Checks if a host belongs to a site domain
///
/// A host matches when it equals the domain or is any subdomain of it, so
/// `dailymail.co.uk` accepts `www.dailymail.co.uk` and `video.dailymail.co.uk`
/// but not `notdailymail.co.uk`.
///
/// # Examples
///
/// ```
/// use clickbait_scraper::url::matches_domain;
///
/// assert!(matches_domain("example.com", "example.com"));
/// assert!(matches_domain("example.com", "www.example.com"));
/// assert!(!matches_domain("example.com", "badexample.com"));
/// assert!(!matches_domain("example.com", "example.org"));
/// ```
pub fn matches_domain(domain: &str, host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Checks whether a URL has the shape of an article page
///
/// Only the path is inspected, so query strings do not hide the suffix.
///
/// # Examples
///
/// ```
/// use clickbait_scraper::url::has_article_shape;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/news/article-123/Story.html").unwrap();
/// assert!(has_article_shape(&url, &[".html".to_string()]));
///
/// let url = Url::parse("https://example.com/news/index").unwrap();
/// assert!(!has_article_shape(&url, &[".html".to_string()]));
/// ```
pub fn has_article_shape(url: &Url, suffixes: &[String]) -> bool {
    let path = url.path();
    suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
}
