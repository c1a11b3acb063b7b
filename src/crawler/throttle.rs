//! Politeness throttle for outbound requests
//!
//! The crawler makes one request at a time. The throttle remembers when the
//! last request finished and makes the next one wait until the politeness
//! delay has passed, whether the last request succeeded or not.

use std::time::{Duration, Instant};

/// Enforces a minimum gap between consecutive requests
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Minimum time between the end of one request and the start of the next
    delay: Duration,

    /// When the most recent request finished
    last_request: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Raises the delay to at least `delay`; never lowers it
    pub fn raise_delay(&mut self, delay: Duration) {
        if delay > self.delay {
            self.delay = delay;
        }
    }

    /// Returns how long to wait before the next request may start
    ///
    /// # Returns
    ///
    /// * `None` - A request may start now
    /// * `Some(Duration)` - Time remaining until a request may start
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let ready_at = last + self.delay;
        if now >= ready_at {
            None
        } else {
            Some(ready_at - now)
        }
    }

    /// Sleeps until a request may start
    pub async fn wait(&self) {
        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tracing::trace!(?wait, "Politeness delay");
            tokio::time::sleep(wait).await;
        }
    }

    /// Records that a request just finished
    pub fn record_request(&mut self) {
        self.last_request = Some(Instant::now());
    }
}

/// Upper bound applied to a robots.txt Crawl-delay
pub const MAX_CRAWL_DELAY: Duration = Duration::from_secs(600);

/// Computes the effective delay given a robots.txt Crawl-delay
///
/// The larger of the configured delay and the site's Crawl-delay wins. The
/// Crawl-delay is capped at [`MAX_CRAWL_DELAY`].
pub fn effective_delay(configured: Duration, robots_crawl_delay: Option<f64>) -> Duration {
    match robots_crawl_delay {
        Some(secs) if secs.is_finite() && secs > 0.0 => {
            let requested = Duration::try_from_secs_f64(secs).unwrap_or(MAX_CRAWL_DELAY);
            configured.max(requested.min(MAX_CRAWL_DELAY))
        }
        _ => configured,
    }
}
