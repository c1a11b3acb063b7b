//! URL handling module for Clickbait-Scraper
//!
//! This module provides URL normalization, domain extraction, domain
//! matching, and the article-shape heuristic used during link discovery.

mod domain;
mod matcher;
mod normalize;

pub use domain::{extract_domain, site_domain};
pub use matcher::{has_article_shape, matches_domain};
pub use normalize::{normalize_parsed, normalize_url};
