use crate::error::ScrapeError;

/// Request parameters for one marketplace region. Pagination offsets and
/// region encoding are site-contract details, kept here as data so adding
/// a region is a table entry rather than a pipeline change.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    /// Region code, also echoed into every scraped record.
    pub code: &'static str,
    /// Scheme and host, used to absolutize relative listing links.
    pub base_url: &'static str,
    /// Path prefix of the live-search endpoint.
    pub search_path: &'static str,
    /// Listings per result page; drives the offset parameter.
    pub page_size: usize,
}

pub const DEFAULT_SITE: &str = "EBAY_GB";

const SITES: &[Site] = &[
    Site {
        code: "EBAY_US",
        base_url: "https://www.watchcount.com",
        search_path: "/live",
        page_size: 20,
    },
    Site {
        code: "EBAY_GB",
        base_url: "https://www.watchcount.com",
        search_path: "/live",
        page_size: 20,
    },
    Site {
        code: "EBAY_DE",
        base_url: "https://www.watchcount.com",
        search_path: "/live",
        page_size: 20,
    },
    Site {
        code: "EBAY_AU",
        base_url: "https://www.watchcount.com",
        search_path: "/live",
        page_size: 20,
    },
];

impl Site {
    pub fn from_code(code: &str) -> Result<Site, ScrapeError> {
        SITES
            .iter()
            .copied()
            .find(|site| site.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                ScrapeError::Config(format!(
                    "unknown site code '{}', expected one of: {}",
                    code,
                    SITES.iter().map(|s| s.code).collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// URL of one result page of a keyword search, 1-based page index.
    pub fn search_url(&self, keywords: &str, min_price: f64, page: usize) -> String {
        let offset = (page - 1) * self.page_size;
        format!(
            "{}{}/{}/-/all?minPrice={}&offset={}&site={}",
            self.base_url,
            self.search_path,
            urlencoding::encode(keywords),
            min_price,
            offset,
            self.code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_ignores_case() {
        let site = Site::from_code("ebay_us").unwrap();
        assert_eq!(site.code, "EBAY_US");
    }

    #[test]
    fn from_code_rejects_unknown_region() {
        let err = Site::from_code("EBAY_MOON").unwrap_err();
        assert!(err.to_string().contains("unknown site code"));
    }

    #[test]
    fn search_url_encodes_keywords_and_offsets_pages() {
        let site = Site::from_code("EBAY_GB").unwrap();
        let url = site.search_url("seiko diver", 15.0, 3);
        assert_eq!(
            url,
            "https://www.watchcount.com/live/seiko%20diver/-/all?minPrice=15&offset=40&site=EBAY_GB"
        );
    }

    #[test]
    fn search_url_first_page_has_zero_offset() {
        let site = Site::from_code("EBAY_US").unwrap();
        let url = site.search_url("lego", 0.0, 1);
        assert!(url.contains("offset=0"));
        assert!(url.contains("site=EBAY_US"));
    }
}
