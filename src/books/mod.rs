//! Book catalog: record model, listing extraction, crawling and summaries.

pub mod crawl;
pub mod models;
pub mod parser;
pub mod selectors;
pub mod stats;

pub use crawl::{CatalogSource, CrawlResult, CrawlState, Crawler, HttpCatalog, Politeness, StopReason};
pub use models::{rating_from_class, Book};
pub use parser::{extract_books, extract_books_from_html, parse_price, ExtractError};
pub use stats::CatalogSummary;
