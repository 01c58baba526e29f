use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::aggregate::Aggregator;
use crate::{debug_eprintln, debug_println};
use crate::error::ScrapeError;
use crate::filter::retain_min_price;
use crate::models::Listing;
use crate::parser::parse_listings;
use crate::progress::PageProgress;
use crate::sites::Site;
use crate::source::PageSource;

/// Knobs for one pipeline run. Passed in explicitly so runs stay
/// reproducible and testable without ambient state.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Upper bound on the page loop; the run may stop earlier on an
    /// empty page.
    pub pages: usize,
    /// Inclusive price threshold; zero keeps everything.
    pub min_price: f64,
    /// Pause between page fetches, to stay under the site's rate limits.
    pub request_delay: Duration,
    /// Fetch attempts per page before the run is abandoned.
    pub retry_attempts: u32,
    /// First backoff pause; doubled on every further attempt.
    pub retry_base_delay: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            pages: 1,
            min_price: 0.0,
            request_delay: Duration::from_millis(500),
            retry_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

/// Runs the fetch -> parse -> filter loop over pages 1..=pages in order,
/// then merges the accumulated page results into one deduplicated
/// collection. A page that parses to zero candidates ends the loop
/// early; no later page is fetched.
pub fn run_pipeline<S: PageSource>(
    source: &S,
    site: &Site,
    options: &ScrapeOptions,
    mut progress: Option<&mut PageProgress>,
) -> Result<Vec<Listing>, ScrapeError> {
    let mut page_results: Vec<Vec<Listing>> = Vec::new();
    let mut kept_total = 0;

    if let Some(progress) = progress.as_mut() {
        progress.start(options.pages)?;
    }

    for page in 1..=options.pages {
        if page > 1 {
            thread::sleep(options.request_delay);
        }

        let html = fetch_with_retry(source, page, options)?;
        let candidates = parse_listings(&html, page, site)?;
        let page_was_empty = candidates.is_empty();

        let kept = retain_min_price(candidates, options.min_price);
        kept_total += kept.len();
        debug_println!(
            "Page {}: kept {} listings after price filter",
            page,
            kept.len()
        );

        if let Some(progress) = progress.as_mut() {
            progress.page_done(page, options.pages, kept.len(), kept_total)?;
        }

        page_results.push(kept);

        if page_was_empty {
            debug_println!("Page {} has no listings, assuming no more results", page);
            break;
        }
    }

    let mut aggregator = Aggregator::new();
    for page_listings in page_results {
        aggregator.add_page(page_listings);
    }

    if let Some(progress) = progress.as_mut() {
        progress.finish(aggregator.len())?;
    }

    Ok(aggregator.into_listings())
}

/// Fetches one page, retrying retryable failures with exponential
/// backoff plus a little jitter. Non-retryable failures and exhausted
/// retries surface the error as-is.
fn fetch_with_retry<S: PageSource>(
    source: &S,
    page: usize,
    options: &ScrapeOptions,
) -> Result<String, ScrapeError> {
    let mut backoff = options.retry_base_delay;
    let mut attempt = 0;

    loop {
        attempt += 1;
        match source.fetch_page(page) {
            Ok(html) => return Ok(html),
            Err(err) if err.is_retryable() && attempt < options.retry_attempts => {
                let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..250));
                debug_eprintln!(
                    "Fetch attempt {}/{} for page {} failed ({}), retrying in {:?}",
                    attempt,
                    options.retry_attempts,
                    page,
                    err,
                    backoff + jitter
                );
                thread::sleep(backoff + jitter);
                backoff *= 2;
            }
            Err(err) => return Err(err),
        }
    }
}
