//! Article content extraction
//!
//! Headline and body are located with ordered fallback chains:
//!
//! - **Headline**: each rule is tried from most to least specific; for every
//!   rule only the first matching element is inspected, and the first one
//!   with non-empty text wins.
//! - **Body**: paragraphs inside the known content containers. When no
//!   container exists on the page, every paragraph is scanned instead and
//!   paragraphs containing a boilerplate marker are dropped.
//!
//! A page that yields no headline or no body produces
//! [`ExtractionIncomplete`] rather than a partial record.

use crate::config::SiteProfile;
use crate::crawler::discovery::{compile_selector, compile_selectors};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// One output row
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub headline: String,
    pub article: String,
    pub url: String,
}

/// Why a page produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionIncomplete {
    #[error("no headline found")]
    MissingHeadline,

    #[error("no article text found")]
    MissingBody,
}

/// Extracts [`ArticleRecord`]s from article markup
#[derive(Debug)]
pub struct ContentExtractor {
    headline_rules: Vec<Selector>,
    containers: Vec<Selector>,
    paragraph: Selector,
    boilerplate_markers: Vec<String>,
}

impl ContentExtractor {
    pub fn new(site: &SiteProfile) -> Result<Self, ConfigError> {
        Ok(Self {
            headline_rules: compile_selectors(&site.headline_selectors)?,
            containers: compile_selectors(&site.body_containers)?,
            paragraph: compile_selector(&site.paragraph_selector)?,
            boilerplate_markers: site.boilerplate_markers.clone(),
        })
    }

    /// Extracts a record from an article page
    ///
    /// # Example
    ///
    /// ```
    /// use clickbait_scraper::config::SiteProfile;
    /// use clickbait_scraper::crawler::ContentExtractor;
    /// use url::Url;
    ///
    /// let extractor = ContentExtractor::new(&SiteProfile::default()).unwrap();
    /// let html = r#"<h1>Big news</h1><div id="js-article-text"><p>It happened.</p></div>"#;
    /// let url = Url::parse("https://www.example.com/a.html").unwrap();
    ///
    /// let record = extractor.extract(html, &url).unwrap();
    /// assert_eq!(record.headline, "Big news");
    /// assert_eq!(record.article, "It happened.");
    /// ```
    pub fn extract(&self, html: &str, url: &Url) -> Result<ArticleRecord, ExtractionIncomplete> {
        let document = Html::parse_document(html);

        let headline = self
            .headline(&document)
            .ok_or(ExtractionIncomplete::MissingHeadline)?;

        let article = self.body(&document);
        if article.is_empty() {
            return Err(ExtractionIncomplete::MissingBody);
        }

        Ok(ArticleRecord {
            headline,
            article,
            url: url.to_string(),
        })
    }

    fn headline(&self, document: &Html) -> Option<String> {
        self.headline_rules.iter().find_map(|rule| {
            document
                .select(rule)
                .next()
                .map(element_text)
                .filter(|text| !text.is_empty())
        })
    }

    fn body(&self, document: &Html) -> String {
        let containers: Vec<ElementRef> = self
            .containers
            .iter()
            .flat_map(|selector| document.select(selector))
            .collect();

        let parts: Vec<String> = if containers.is_empty() {
            document
                .select(&self.paragraph)
                .map(element_text)
                .filter(|text| !text.is_empty() && !self.is_boilerplate(text))
                .collect()
        } else {
            // Walking the whole document keeps paragraphs in document order and
            // visits a paragraph under nested containers only once
            document
                .select(&self.paragraph)
                .filter(|paragraph| is_within(*paragraph, &containers))
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect()
        };

        parts.join(" ").trim().to_string()
    }

    fn is_boilerplate(&self, text: &str) -> bool {
        self.boilerplate_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
    }
}

/// True if `element` is one of `containers` or a descendant of one
fn is_within<'a>(element: ElementRef<'a>, containers: &[ElementRef<'a>]) -> bool {
    containers.contains(&element)
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| containers.contains(&ancestor))
}

/// Text of an element: text nodes trimmed and joined with single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ContentExtractor {
        ContentExtractor::new(&SiteProfile::default()).unwrap()
    }

    fn url() -> Url {
        Url::parse("https://www.dailymail.co.uk/news/article-1/Story.html").unwrap()
    }

    fn extract(html: &str) -> Result<ArticleRecord, ExtractionIncomplete> {
        extractor().extract(html, &url())
    }

    #[test]
    fn test_specific_headline_marker_preferred() {
        let html = r#"
            <html><head><title>Site title</title></head><body>
            <h1>Generic heading</h1>
            <h2 class="linkro-darkred">Specific headline</h2>
            <div id="js-article-text"><p>Body.</p></div>
            </body></html>
        "#;
        assert_eq!(extract(html).unwrap().headline, "Specific headline");
    }

    #[test]
    fn test_itemprop_headline_before_plain_h1() {
        let html = r#"
            <h1>Plain</h1>
            <h1 itemprop="headline">Marked</h1>
            <p>Body text.</p>
        "#;
        assert_eq!(extract(html).unwrap().headline, "Marked");
    }

    #[test]
    fn test_empty_rule_falls_through() {
        let html = r#"
            <html><head><title>Fallback title</title></head><body>
            <h2 class="linkro-darkred">   </h2>
            <p>Body text.</p>
            </body></html>
        "#;
        assert_eq!(extract(html).unwrap().headline, "Fallback title");
    }

    #[test]
    fn test_only_first_element_of_rule_inspected() {
        let html = r#"
            <html><head><title>Title</title></head><body>
            <h1></h1><h1>Second h1</h1>
            <p>Body text.</p>
            </body></html>
        "#;
        assert_eq!(extract(html).unwrap().headline, "Title");
    }

    #[test]
    fn test_headline_whitespace_collapsed() {
        let html = "<h1>\n  Man <em>bites</em>\n dog  </h1><p>Body.</p>";
        assert_eq!(extract(html).unwrap().headline, "Man bites dog");
    }

    #[test]
    fn test_container_paragraphs_joined_with_spaces() {
        let html = r#"
            <h1>Headline</h1>
            <p>Outside paragraph.</p>
            <div id="js-article-text">
                <p>First  paragraph.</p>
                <p></p>
                <p>Second <a href="/x">linked</a> paragraph.</p>
            </div>
        "#;
        assert_eq!(
            extract(html).unwrap().article,
            "First paragraph. Second linked paragraph."
        );
    }

    #[test]
    fn test_nested_containers_do_not_duplicate() {
        let html = r#"
            <h1>Headline</h1>
            <div id="js-article-text">
                <p class="mol-para-with-font">One.</p>
                <div class="article-text"><p>Two.</p></div>
            </div>
        "#;
        assert_eq!(extract(html).unwrap().article, "One. Two.");
    }

    #[test]
    fn test_paragraph_container_counts_itself() {
        let html = r#"
            <h1>Headline</h1>
            <p class="mol-para-with-font">Only styled paragraph.</p>
            <p>Unstyled paragraph.</p>
        "#;
        assert_eq!(extract(html).unwrap().article, "Only styled paragraph.");
    }

    #[test]
    fn test_multiple_containers_in_document_order() {
        let html = r#"
            <h1>Headline</h1>
            <div class="article-text"><p>A.</p></div>
            <div id="js-article-text"><p>B.</p></div>
        "#;
        assert_eq!(extract(html).unwrap().article, "A. B.");
    }

    #[test]
    fn test_fallback_filters_boilerplate() {
        let html = r#"
            <h1>Headline</h1>
            <p>Real sentence one.</p>
            <p>Follow Daily Mail on Twitter</p>
            <p>Sign up for our e-mail newsletter</p>
            <p>Real sentence two.</p>
        "#;
        assert_eq!(
            extract(html).unwrap().article,
            "Real sentence one. Real sentence two."
        );
    }

    #[test]
    fn test_boilerplate_kept_inside_container() {
        let html = r#"
            <h1>Headline</h1>
            <div id="js-article-text"><p>Send us an e-mail.</p></div>
        "#;
        assert_eq!(extract(html).unwrap().article, "Send us an e-mail.");
    }

    #[test]
    fn test_headline_without_body_is_dropped() {
        let html = r#"<h1>Headline only</h1><div id="js-article-text"></div>"#;
        assert_eq!(extract(html), Err(ExtractionIncomplete::MissingBody));
    }

    #[test]
    fn test_only_boilerplate_is_dropped() {
        let html = r#"<h1>Headline</h1><p>Follow Daily Mail</p>"#;
        assert_eq!(extract(html), Err(ExtractionIncomplete::MissingBody));
    }

    #[test]
    fn test_missing_headline_is_dropped() {
        let html = r#"<div id="js-article-text"><p>Body without any heading.</p></div>"#;
        assert_eq!(extract(html), Err(ExtractionIncomplete::MissingHeadline));
    }

    #[test]
    fn test_record_carries_source_url() {
        let html = r#"<h1>H</h1><p>B</p>"#;
        assert_eq!(extract(html).unwrap().url, url().to_string());
    }
}
