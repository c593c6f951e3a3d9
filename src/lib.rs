//! toscrape - Web scraping exercises against the toscrape.com sandboxes
//!
//! A resilient retrying fetcher, catalog crawling with CSV/JSON export,
//! static selector extraction, and browser-driven extraction for
//! JavaScript-rendered pages.

pub mod books;
pub mod commands;
pub mod config;
pub mod export;
pub mod format;
pub mod html;
pub mod http;
pub mod inspect;
pub mod quotes;
pub mod report;

pub use books::{Book, CatalogSummary, ExtractError};
pub use config::Config;
pub use http::{FetchOutcome, Fetcher, HeaderSet};
pub use quotes::Quote;
pub use report::Report;
