//! Quote records.

use serde::{Deserialize, Serialize};

/// A quote with its author and tag labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// Per-quote attribute view of a static page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteDetails {
    pub text: String,
    pub author: String,
    /// `/author/...` link, if present.
    pub about_href: Option<String>,
    pub tag_count: usize,
    /// Class list of the quote container.
    pub classes: Vec<String>,
}
