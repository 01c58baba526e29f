use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::debug_println;
use crate::error::ScrapeError;
use crate::models::Listing;
use crate::sites::Site;

/// Extracts the candidate listings from one result page, in document
/// order. A recognizable page with zero result rows is a valid empty
/// result; a page without any results container is a parse failure.
/// Rows missing id, title, or a usable price are skipped, never fatal.
pub fn parse_listings(html: &str, page: usize, site: &Site) -> Result<Vec<Listing>, ScrapeError> {
    let document = Html::parse_document(html);

    let container_selector = Selector::parse("#results, .results, .resultRow").unwrap();
    if document.select(&container_selector).next().is_none() {
        return Err(ScrapeError::Parse {
            page,
            reason: "no results container in page content".to_string(),
        });
    }

    let row_selector = Selector::parse(".resultRow").unwrap();
    let title_selector = Selector::parse(".resultTitle a").unwrap();
    let price_selector = Selector::parse(".resultPrice").unwrap();

    let mut listings = Vec::new();

    for row in document.select(&row_selector) {
        if let Some(listing) = parse_row(row, &title_selector, &price_selector, page, site) {
            listings.push(listing);
        }
    }

    debug_println!("Parsed {} listings from page {}", listings.len(), page);
    Ok(listings)
}

fn parse_row(
    row: ElementRef,
    title_selector: &Selector,
    price_selector: &Selector,
    page: usize,
    site: &Site,
) -> Option<Listing> {
    let title_element = match row.select(title_selector).next() {
        Some(element) => element,
        None => {
            debug_println!("Skipping row without title link on page {}", page);
            return None;
        }
    };

    let title = title_element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    let href = title_element.value().attr("href").unwrap_or("").trim();
    if title.is_empty() || href.is_empty() {
        debug_println!("Skipping row with empty title or link on page {}", page);
        return None;
    }

    let url = absolutize(href, site);
    let id = match listing_id(&url) {
        Some(id) => id,
        None => {
            debug_println!("Skipping '{}' on page {}: no listing id in url", title, page);
            return None;
        }
    };

    let price_text = match row.select(price_selector).next() {
        Some(element) => element.text().collect::<Vec<_>>().join(" "),
        None => {
            debug_println!("Skipping '{}' on page {}: no price element", title, page);
            return None;
        }
    };

    let price = match normalize_price(&price_text) {
        Some(price) => price,
        None => {
            debug_println!(
                "Skipping '{}' on page {}: unparsable price '{}'",
                title,
                page,
                price_text.trim()
            );
            return None;
        }
    };

    Some(Listing {
        id,
        title,
        price,
        url,
        site: site.code.to_string(),
        page,
    })
}

/// Strips currency markers and thousands separators from a price display
/// text and parses the remaining numeral. Returns None when no usable
/// number is present; callers drop the entry rather than defaulting.
pub fn normalize_price(text: &str) -> Option<f64> {
    let number_regex = Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap();
    let raw = number_regex.find(text)?.as_str().replace(',', "");

    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
        _ => None,
    }
}

/// Identifier as the site assigns it: the last path segment of the
/// listing URL, query string stripped.
fn listing_id(url: &str) -> Option<String> {
    let without_query = url.split('?').next().unwrap_or(url);
    let segment = without_query.rsplit('/').next().unwrap_or("").trim();

    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

fn absolutize(href: &str, site: &Site) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", site.base_url, href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_site() -> Site {
        Site::from_code("EBAY_GB").unwrap()
    }

    fn result_page(rows: &str) -> String {
        format!(
            "<html><body><div id=\"results\">{}</div></body></html>",
            rows
        )
    }

    fn row(href: &str, title: &str, price: &str) -> String {
        format!(
            "<div class=\"resultRow\">\
             <div class=\"resultTitle\"><a href=\"{}\">{}</a></div>\
             <div class=\"resultPrice\">{}</div>\
             </div>",
            href, title, price
        )
    }

    #[test]
    fn parses_valid_rows_in_document_order() {
        let html = result_page(&format!(
            "{}{}",
            row("/itm/seiko-diver-1001?ref=ln", "Seiko Diver", "$129.99"),
            row("https://www.watchcount.com/itm/omega-1002", "Omega", "$1,450.00"),
        ));

        let listings = parse_listings(&html, 1, &test_site()).unwrap();
        assert_eq!(listings.len(), 2);

        assert_eq!(listings[0].id, "seiko-diver-1001");
        assert_eq!(listings[0].title, "Seiko Diver");
        assert_eq!(listings[0].price, 129.99);
        assert_eq!(listings[0].url, "https://www.watchcount.com/itm/seiko-diver-1001");
        assert_eq!(listings[0].site, "EBAY_GB");
        assert_eq!(listings[0].page, 1);

        assert_eq!(listings[1].id, "omega-1002");
        assert_eq!(listings[1].price, 1450.0);
    }

    #[test]
    fn empty_results_container_is_a_valid_empty_page() {
        let html = result_page("");
        let listings = parse_listings(&html, 2, &test_site()).unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn unrecognizable_page_is_a_parse_error() {
        let html = "<html><body><h1>503 Service Unavailable</h1></body></html>";
        let err = parse_listings(html, 1, &test_site()).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse { page: 1, .. }));
    }

    #[test]
    fn rows_with_missing_fields_are_skipped() {
        let html = result_page(&format!(
            "{}{}{}{}",
            "<div class=\"resultRow\"><div class=\"resultPrice\">$5.00</div></div>",
            row("/itm/no-price-1003", "No Price", ""),
            row("", "Empty Link", "$9.99"),
            row("/itm/kept-1004", "Kept", "$9.99"),
        ));

        let listings = parse_listings(&html, 1, &test_site()).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "kept-1004");
    }

    #[test]
    fn unparsable_price_drops_the_entry() {
        let html = result_page(&row("/itm/call-1005", "Contact seller", "Call for price"));
        let listings = parse_listings(&html, 1, &test_site()).unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn normalize_price_strips_currency_and_separators() {
        assert_eq!(normalize_price("$1,234.56"), Some(1234.56));
        assert_eq!(normalize_price("GBP 15"), Some(15.0));
        assert_eq!(normalize_price(" £0.99 "), Some(0.99));
        assert_eq!(normalize_price("12,000"), Some(12000.0));
        assert_eq!(normalize_price("free"), None);
        assert_eq!(normalize_price(""), None);
    }

    #[test]
    fn listing_id_takes_last_path_segment_without_query() {
        assert_eq!(
            listing_id("https://www.watchcount.com/itm/seiko-1001?ref=a&b=c"),
            Some("seiko-1001".to_string())
        );
        assert_eq!(listing_id("https://www.watchcount.com/itm/"), None);
    }
}
