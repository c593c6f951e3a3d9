//! Data model for catalog listings.

use serde::{Deserialize, Serialize};

/// One book as listed on a catalog page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    /// Price in pounds, currency symbol stripped.
    pub price: f64,
    /// Whether the stock line says "in stock".
    pub available: bool,
    /// Star rating ordinal, 1 to 5.
    pub rating: Option<u8>,
    /// Link to the detail page, relative to the listing page.
    pub relative_url: String,
}

/// Maps a star-rating class name to its ordinal.
///
/// The vocabulary is closed: anything other than `One`..`Five` (exact case)
/// yields `None`.
pub fn rating_from_class(class: &str) -> Option<u8> {
    match class {
        "One" => Some(1),
        "Two" => Some(2),
        "Three" => Some(3),
        "Four" => Some(4),
        "Five" => Some(5),
        _ => None,
    }
}

/// Picks the first class that belongs to the rating vocabulary.
pub fn rating_from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<u8> {
    classes.into_iter().find_map(rating_from_class)
}
