use std::fs;
use std::path::{Path, PathBuf};

use crate::debug_println;
use crate::error::ScrapeError;
use crate::sites::Site;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Where raw page content comes from. The live fetcher and the sample
/// directory reader are interchangeable; the pipeline only ever sees
/// this trait.
pub trait PageSource {
    /// Raw content of the 1-based result page.
    fn fetch_page(&self, page: usize) -> Result<String, ScrapeError>;
}

/// Fetches result pages from the live search endpoint.
pub struct LiveSource {
    client: reqwest::blocking::Client,
    site: Site,
    keywords: String,
    min_price: f64,
}

impl LiveSource {
    pub fn new(site: Site, keywords: &str, min_price: f64) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            site,
            keywords: keywords.to_string(),
            min_price,
        }
    }
}

impl PageSource for LiveSource {
    fn fetch_page(&self, page: usize) -> Result<String, ScrapeError> {
        let url = self.site.search_url(&self.keywords, self.min_price, page);
        debug_println!("Fetching listing page: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| ScrapeError::Fetch {
                page,
                reason: e.to_string(),
                retryable: true,
            })?;

        let status = response.status();
        if !status.is_success() {
            // 429 and 5xx are worth another attempt, anything else is not
            let retryable = status.as_u16() == 429 || status.is_server_error();
            return Err(ScrapeError::Fetch {
                page,
                reason: format!("HTTP status {}", status),
                retryable,
            });
        }

        response.text().map_err(|e| ScrapeError::Fetch {
            page,
            reason: e.to_string(),
            retryable: true,
        })
    }
}

/// Replays pre-captured result pages from a directory, one file per page
/// in sorted file name order. Never touches the network, so runs over
/// the same directory are fully reproducible.
pub struct SampleDirSource {
    pages: Vec<PathBuf>,
}

impl SampleDirSource {
    pub fn new(dir: &Path) -> Result<Self, ScrapeError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            ScrapeError::Config(format!(
                "cannot read sample directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut pages: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        pages.sort();

        if pages.is_empty() {
            return Err(ScrapeError::Config(format!(
                "sample directory {} contains no page files",
                dir.display()
            )));
        }

        debug_println!("Using {} sample pages from {}", pages.len(), dir.display());
        Ok(Self { pages })
    }
}

impl PageSource for SampleDirSource {
    fn fetch_page(&self, page: usize) -> Result<String, ScrapeError> {
        // A missing fixture is fatal: there is nothing to retry with.
        let path = self.pages.get(page - 1).ok_or_else(|| ScrapeError::Fetch {
            page,
            reason: format!("no sample file for page {}", page),
            retryable: false,
        })?;

        fs::read_to_string(path).map_err(|e| ScrapeError::Fetch {
            page,
            reason: format!("cannot read {}: {}", path.display(), e),
            retryable: false,
        })
    }
}
