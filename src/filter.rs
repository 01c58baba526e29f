use crate::models::Listing;

/// Keeps listings priced at or above the threshold. The boundary is
/// inclusive; a zero threshold keeps everything.
pub fn retain_min_price(listings: Vec<Listing>, min_price: f64) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|listing| listing.price >= min_price)
        .collect()
}
