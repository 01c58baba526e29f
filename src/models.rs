use serde::{Deserialize, Serialize};

/// One scraped listing. Built by the parser from a single result page and
/// immutable afterwards; later pipeline stages drop records, they never
/// edit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Identifier the source site assigned to the listing, used as the
    /// dedup key across pages.
    pub id: String,
    pub title: String,
    /// Normalized from the site's display text ("$1,234.56" -> 1234.56).
    pub price: f64,
    /// Absolute link to the listing.
    pub url: String,
    /// Marketplace region code the run targeted.
    pub site: String,
    /// 1-based result page the listing was found on.
    pub page: usize,
}
