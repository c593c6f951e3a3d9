//! Extraction of book records from catalog listing pages.

use crate::books::models::{rating_from_classes, Book};
use crate::books::selectors;
use crate::html::{class_list, joined_text, stripped_text};
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::{debug, trace};

/// Price text used when a product block has no price node.
pub const DEFAULT_PRICE_TEXT: &str = "£0.00";

/// Left behind when a UTF-8 `£` is decoded as Latin-1 (`Â£`).
pub const MOJIBAKE_ARTIFACT: &str = "Â";

pub const CURRENCY_SYMBOL: &str = "£";

/// A field that could not be turned into a record value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("invalid price text: {raw:?}")]
    InvalidPrice { raw: String },
}

/// Parses listing markup and extracts its books.
pub fn extract_books_from_html(html: &str) -> Result<Vec<Book>, ExtractError> {
    let document = Html::parse_document(html);
    extract_books(&document)
}

/// Extracts one [`Book`] per product block, in document order.
///
/// A page without product blocks yields an empty list. A price that does
/// not parse fails the whole page.
pub fn extract_books(document: &Html) -> Result<Vec<Book>, ExtractError> {
    let books = document
        .select(&selectors::PRODUCT)
        .map(extract_book)
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Extracted {} books", books.len());
    Ok(books)
}

fn extract_book(block: ElementRef) -> Result<Book, ExtractError> {
    let link = block.select(&selectors::TITLE_LINK).next();

    let title = link
        .map(|a| match a.value().attr("title") {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => stripped_text(a),
        })
        .unwrap_or_default();

    let relative_url = link.and_then(|a| a.value().attr("href")).unwrap_or_default().to_string();

    let price_text = block
        .select(&selectors::PRICE)
        .next()
        .map(stripped_text)
        .unwrap_or_else(|| DEFAULT_PRICE_TEXT.to_string());
    let price = parse_price(&price_text)?;

    let available = block
        .select(&selectors::STOCK)
        .next()
        .is_some_and(|e| is_in_stock(&joined_text(e, " ")));

    let rating = block.select(&selectors::STAR_RATING).next().and_then(|e| rating_from_classes(class_list(e)));

    trace!("Parsed book: {} - {}", title, price);

    Ok(Book { title, price, available, rating, relative_url })
}

/// Parses a price like `£51.77` (or the mis-decoded `Â£51.77`).
///
/// The result must be a finite, non-negative number.
pub fn parse_price(text: &str) -> Result<f64, ExtractError> {
    let cleaned = text.replace(MOJIBAKE_ARTIFACT, "").replace(CURRENCY_SYMBOL, "");
    let invalid = || ExtractError::InvalidPrice { raw: text.to_string() };

    let value: f64 = cleaned.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// True if the stock text mentions "in stock", ignoring case.
pub fn is_in_stock(text: &str) -> bool {
    text.trim().to_lowercase().contains("in stock")
}
