//! Text helpers over parsed elements.

use scraper::ElementRef;

/// Concatenates the element's text nodes, each trimmed, empty ones dropped.
pub fn stripped_text(element: ElementRef) -> String {
    joined_text(element, "")
}

/// Like [`stripped_text`] but joins the trimmed pieces with `separator`.
pub fn joined_text(element: ElementRef, separator: &str) -> String {
    element.text().map(str::trim).filter(|s| !s.is_empty()).collect::<Vec<_>>().join(separator)
}

/// Class names in markup order, duplicates kept.
pub fn class_list<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.value().attr("class").unwrap_or_default().split_whitespace()
}

/// Raw text content, untouched.
pub fn raw_text(element: ElementRef) -> String {
    element.text().collect()
}
