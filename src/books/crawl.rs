//! Sequential multi-page crawl over a paginated catalog.

use crate::books::models::Book;
use crate::books::parser::extract_books_from_html;
use crate::config::Config;
use crate::http::{FetchOptions, Fetcher};
use crate::report::Report;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Source of catalog listing pages - enables mocking for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// URL of the 1-based listing page.
    fn page_url(&self, page: u32) -> String;

    /// Listing page markup, or `None` when the page is missing or could not
    /// be fetched.
    async fn fetch_page(&self, page: u32) -> Option<String>;
}

/// Catalog served over HTTP, pages addressed by a `{}` URL pattern.
pub struct HttpCatalog {
    fetcher: Fetcher,
    options: FetchOptions,
    url_pattern: String,
}

impl HttpCatalog {
    pub fn new(fetcher: Fetcher, options: FetchOptions, url_pattern: impl Into<String>) -> Self {
        Self { fetcher, options, url_pattern: url_pattern.into() }
    }

    /// Builds a catalog from configuration, using the crawl timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Fetcher::new(config).context("Failed to create HTTP client")?;
        let options = FetchOptions::from_config(config, config.crawl_timeout_secs);
        Ok(Self::new(fetcher, options, config.books_url.clone()))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    fn page_url(&self, page: u32) -> String {
        self.url_pattern.replace("{}", &page.to_string())
    }

    async fn fetch_page(&self, page: u32) -> Option<String> {
        let url = self.page_url(page);
        self.fetcher.fetch(&url, &self.options, None).await.into_response().map(|r| r.body)
    }
}

/// Random pause between pages, uniform in `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Politeness {
    pub min: Duration,
    pub max: Duration,
}

impl Default for Politeness {
    fn default() -> Self {
        Self { min: Duration::from_secs(1), max: Duration::from_secs(3) }
    }
}

impl Politeness {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self { min: Duration::ZERO, max: Duration::ZERO }
    }

    /// Draws the next pause. Falls back to `min` if the range is empty.
    pub fn pick(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        if max <= min {
            return self.min;
        }
        Duration::from_millis(rand::random_range(min..max))
    }
}

/// Why a crawl stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page could not be fetched (missing page or retries exhausted).
    NoResponse,
    /// The page was fetched but had no product blocks.
    EmptyPage,
    /// The configured page limit was reached.
    PageLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Running,
    Stopped(StopReason),
}

/// Accumulated output of a crawl.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Books from every page, in page order.
    pub books: Vec<Book>,
    /// Highest page number requested.
    pub last_page: u32,
    pub stop_reason: StopReason,
}

/// Walks listing pages 1, 2, ... until a page is missing or empty.
#[derive(Debug, Clone)]
pub struct Crawler {
    politeness: Politeness,
    max_pages: Option<u32>,
}

impl Crawler {
    pub fn new(politeness: Politeness) -> Self {
        Self { politeness, max_pages: None }
    }

    pub fn from_config(config: &Config) -> Self {
        let politeness = Politeness::new(
            Duration::from_millis(config.delay_min_ms),
            Duration::from_millis(config.delay_max_ms),
        );
        Self { politeness, max_pages: config.max_pages }
    }

    /// Stops after `max_pages` non-empty pages.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Runs the crawl, writing per-page records into `report`.
    ///
    /// A page whose records fail to extract aborts the crawl with an error.
    pub async fn crawl(&self, source: &impl CatalogSource, report: &mut Report) -> Result<CrawlResult> {
        let mut books: Vec<Book> = Vec::new();
        let mut page = 1;

        let stop_reason = loop {
            if let CrawlState::Stopped(reason) = self.visit(source, page, &mut books, report).await? {
                break reason;
            }

            if self.max_pages.is_some_and(|max| page >= max) {
                report.blank();
                report.line(format!("Page limit ({}) reached. Stopping.", page));
                break StopReason::PageLimit;
            }

            page += 1;

            let delay = self.politeness.pick();
            if !delay.is_zero() {
                report.blank();
                report.line(format!("Politeness delay: {:.2}s", delay.as_secs_f64()));
                debug!("Sleeping {:?} before page {}", delay, page);
                tokio::time::sleep(delay).await;
            }
        };

        info!("Crawl stopped at page {} ({:?}) with {} books", page, stop_reason, books.len());

        Ok(CrawlResult { books, last_page: page, stop_reason })
    }

    /// Fetches and extracts one page.
    async fn visit(
        &self,
        source: &impl CatalogSource,
        page: u32,
        books: &mut Vec<Book>,
        report: &mut Report,
    ) -> Result<CrawlState> {
        let url = source.page_url(page);
        report.section(format!("Page {}", page));
        report.field("URL", &url);
        info!("Crawling page {}: {}", page, url);

        let Some(html) = source.fetch_page(page).await else {
            report.line("No response (missing page or definitive error). Stopping.");
            return Ok(CrawlState::Stopped(StopReason::NoResponse));
        };

        let page_books = extract_books_from_html(&html)
            .with_context(|| format!("Failed to extract books from page {}", page))?;

        if page_books.is_empty() {
            report.line("No books found. Stopping.");
            return Ok(CrawlState::Stopped(StopReason::EmptyPage));
        }

        report.field("Books extracted on this page", page_books.len());
        for (i, book) in page_books.iter().enumerate() {
            write_book(report, i + 1, book);
        }

        debug!("Page {} yielded {} books", page, page_books.len());
        books.extend(page_books);
        Ok(CrawlState::Running)
    }
}

fn write_book(report: &mut Report, index: usize, book: &Book) {
    report.blank();
    report.line(format!("Book {}:", index));
    report.field("  Title", &book.title);
    report.field("  Price", book.price);
    report.field("  Available", book.available);
    report.field("  Rating", book.rating.map(|r| r.to_string()).unwrap_or_else(|| "None".to_string()));
    report.field("  URL (relative)", &book.relative_url);
}
