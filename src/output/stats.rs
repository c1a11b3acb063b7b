//! Crawl run statistics
//!
//! The coordinator fills a [`CrawlSummary`] as it works through candidates;
//! the CLI prints it when the run is over.

use std::time::Duration;

/// Summary statistics for a crawl run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlSummary {
    /// Listing pages the run started from
    pub seed_pages: usize,

    /// Listing pages that could not be fetched or were disallowed by robots.txt
    pub seed_failures: usize,

    /// Unique candidate URLs found during discovery
    pub candidates_discovered: usize,

    /// Candidates processed after the max-articles cap
    pub candidates_attempted: usize,

    /// Records written to the sink
    pub articles_saved: usize,

    pub fetch_failures: usize,

    pub extraction_incomplete: usize,

    pub robots_disallowed: usize,

    pub sink_write_failures: usize,

    pub elapsed: Duration,
}

impl CrawlSummary {
    /// Creates a new empty crawl summary
    pub fn new() -> Self {
        Self::default()
    }

    /// True when discovery produced nothing to fetch
    pub fn no_candidates_found(&self) -> bool {
        self.candidates_discovered == 0
    }

    /// Total candidates that did not produce a record
    pub fn skipped(&self) -> usize {
        self.fetch_failures
            + self.extraction_incomplete
            + self.robots_disallowed
            + self.sink_write_failures
    }

    /// Returns the success rate as a percentage of attempted candidates
    pub fn success_rate(&self) -> f64 {
        if self.candidates_attempted == 0 {
            return 0.0;
        }
        (self.articles_saved as f64 / self.candidates_attempted as f64) * 100.0
    }
}

/// Prints a crawl summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("Discovery:");
    println!(
        "  Listing pages: {} ({} failed)",
        summary.seed_pages, summary.seed_failures
    );
    println!("  Candidate articles: {}", summary.candidates_discovered);
    println!();

    println!("Articles:");
    println!("  Attempted: {}", summary.candidates_attempted);
    println!("  Saved: {}", summary.articles_saved);
    println!("  Skipped: {}", summary.skipped());
    println!("  Fetch failures: {}", summary.fetch_failures);
    println!("  Incomplete extractions: {}", summary.extraction_incomplete);
    if summary.robots_disallowed > 0 {
        println!("  Disallowed by robots.txt: {}", summary.robots_disallowed);
    }
    if summary.sink_write_failures > 0 {
        println!("  Write failures: {}", summary.sink_write_failures);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} articles saved) in {:.1}s",
        summary.success_rate(),
        summary.articles_saved,
        summary.candidates_attempted,
        summary.elapsed.as_secs_f64()
    );
}
