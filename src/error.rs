use thiserror::Error;

/// Failure taxonomy of a pipeline run. Fetch failures carry whether
/// another attempt could help; everything else aborts the run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch page {page}: {reason}")]
    Fetch {
        page: usize,
        reason: String,
        retryable: bool,
    },

    #[error("page {page} is not a recognizable listing page: {reason}")]
    Parse { page: usize, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write results to {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("console output failed: {0}")]
    Console(#[from] std::io::Error),
}

impl ScrapeError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScrapeError::Fetch { retryable: true, .. })
    }
}
