//! Quote pages: static selector extraction and browser-driven extraction.

pub mod browser;
pub mod models;
pub mod parser;
pub mod selectors;

pub use browser::{extract_hybrid, extract_live, paginate, Browser, Locator, PaginationSettings};
pub use models::{Quote, QuoteDetails};
pub use parser::QuotePage;
