use std::collections::HashSet;

use crate::debug_println;
use crate::models::Listing;

/// Merges per-page results into one collection. Listings whose id was
/// already seen on an earlier page (or earlier in the same page) are
/// dropped; the output keeps first-seen insertion order and is never
/// re-sorted.
#[derive(Default)]
pub struct Aggregator {
    seen_ids: HashSet<String>,
    listings: Vec<Listing>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one page's filtered listings, in parse order. Pages must be
    /// fed in increasing page order.
    pub fn add_page(&mut self, page_listings: Vec<Listing>) {
        for listing in page_listings {
            if self.seen_ids.contains(&listing.id) {
                debug_println!(
                    "Dropping duplicate listing {} seen again on page {}",
                    listing.id,
                    listing.page
                );
                continue;
            }

            self.seen_ids.insert(listing.id.clone());
            self.listings.push(listing);
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn into_listings(self) -> Vec<Listing> {
        self.listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, page: usize) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Listing {}", id),
            price: 10.0,
            url: format!("https://www.watchcount.com/itm/{}", id),
            site: "EBAY_GB".to_string(),
            page,
        }
    }

    #[test]
    fn duplicate_across_pages_keeps_first_occurrence() {
        let mut aggregator = Aggregator::new();
        aggregator.add_page(vec![listing("a", 1), listing("b", 1)]);
        aggregator.add_page(vec![listing("b", 2), listing("c", 2)]);

        let merged = aggregator.into_listings();
        let ids: Vec<&str> = merged.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        // the kept "b" is the page-1 record
        assert_eq!(merged[1].page, 1);
    }

    #[test]
    fn output_preserves_insertion_order() {
        let mut aggregator = Aggregator::new();
        aggregator.add_page(vec![listing("z", 1), listing("a", 1)]);
        aggregator.add_page(vec![listing("m", 2)]);

        let ids: Vec<String> = aggregator
            .into_listings()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn duplicate_within_a_page_is_dropped_too() {
        let mut aggregator = Aggregator::new();
        aggregator.add_page(vec![listing("a", 1), listing("a", 1)]);
        assert_eq!(aggregator.len(), 1);
    }
}
