//! Output module for persisting crawl results
//!
//! This module handles:
//! - The record sink interface and its CSV implementation
//! - Crawl run statistics and their console report

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::CsvSink;
pub use stats::{print_summary, CrawlSummary};
pub use traits::{RecordSink, WriteMode, COLUMNS};
