//! Extraction from JavaScript-rendered quote pages through a browser.
//!
//! The browser itself is an external collaborator: anything that can
//! navigate, wait for elements, query them, read their text, click and hand
//! back the rendered source implements [`Browser`].

use crate::quotes::models::Quote;
use crate::quotes::parser::QuotePage;
use crate::quotes::selectors::{class, css};
use crate::report::Report;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// How to find elements in the live page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    ClassName(String),
    Css(String),
}

impl Locator {
    pub fn class(name: impl Into<String>) -> Self {
        Locator::ClassName(name.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    /// Equivalent CSS selector.
    pub fn to_css(&self) -> String {
        match self {
            Locator::ClassName(name) => format!(".{}", name),
            Locator::Css(selector) => selector.clone(),
        }
    }
}

/// A driven browser session.
#[async_trait]
pub trait Browser: Send {
    /// Handle to an element of the current page.
    type Element: Send + Sync;

    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Blocks until an element matching `locator` is present, failing after `timeout`.
    async fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// All matches, searched inside `scope` or the whole page.
    async fn find_all(
        &mut self,
        scope: Option<&Self::Element>,
        locator: &Locator,
    ) -> Result<Vec<Self::Element>>;

    /// Rendered text of an element.
    async fn text(&mut self, element: &Self::Element) -> Result<String>;

    async fn click(&mut self, element: &Self::Element) -> Result<()>;

    /// Current rendered markup.
    async fn page_source(&mut self) -> Result<String>;

    /// Ends the session. Sessions owned elsewhere can keep the default.
    async fn quit(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Timing knobs for browser pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    /// How long to wait for quotes to render.
    pub wait_timeout: Duration,
    /// Pause after clicking "Next".
    pub settle: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self { wait_timeout: Duration::from_secs(10), settle: Duration::from_millis(1200) }
    }
}

/// Reads quotes by querying live elements one by one.
pub async fn extract_live<B: Browser>(browser: &mut B) -> Result<Vec<Quote>> {
    let quote_elements = browser.find_all(None, &Locator::class(class::QUOTE)).await?;
    let mut quotes = Vec::with_capacity(quote_elements.len());

    for element in &quote_elements {
        let text = first_text(browser, element, &Locator::class(class::TEXT)).await?;
        let author = first_text(browser, element, &Locator::class(class::AUTHOR)).await?;

        let mut tags = Vec::new();
        for tag in browser.find_all(Some(element), &Locator::css(css::QUOTE_TAGS)).await? {
            tags.push(browser.text(&tag).await?);
        }

        quotes.push(Quote { text, author, tags });
    }

    debug!("Extracted {} quotes from live elements", quotes.len());
    Ok(quotes)
}

/// Takes the rendered source and extracts quotes with the static parser.
pub async fn extract_hybrid<B: Browser>(browser: &mut B) -> Result<Vec<Quote>> {
    let source = browser.page_source().await.context("Failed to read page source")?;
    let quotes = QuotePage::parse(&source).quotes();
    debug!("Extracted {} quotes from page source", quotes.len());
    Ok(quotes)
}

/// Opens `url` and follows "Next" until it disappears, collecting quotes
/// from every rendered page.
pub async fn paginate<B: Browser>(
    browser: &mut B,
    url: &str,
    settings: &PaginationSettings,
    report: &mut Report,
) -> Result<Vec<Quote>> {
    let quote_locator = Locator::class(class::QUOTE);
    let next_locator = Locator::css(css::NEXT_LINK);

    browser.navigate(url).await.with_context(|| format!("Failed to open {}", url))?;

    let mut all = Vec::new();
    let mut page = 1;

    loop {
        browser
            .wait_for(&quote_locator, settings.wait_timeout)
            .await
            .with_context(|| format!("Quotes did not render on page {}", page))?;

        let quotes = extract_live(browser).await?;
        info!("Browser page {}: {} quotes", page, quotes.len());

        report.section(format!("JS page {}", page));
        report.field("Quotes on this page", quotes.len());
        write_quotes(report, &quotes, Some(page));
        all.extend(quotes);

        let next = browser.find_all(None, &next_locator).await?;
        let Some(link) = next.first() else {
            report.blank();
            report.line("No Next button. Pagination finished.");
            break;
        };

        browser.click(link).await.context("Failed to click Next")?;
        tokio::time::sleep(settings.settle).await;
        page += 1;
    }

    Ok(all)
}

/// Appends numbered quote blocks to a transcript.
pub fn write_quotes(report: &mut Report, quotes: &[Quote], page: Option<u32>) {
    for (i, quote) in quotes.iter().enumerate() {
        report.blank();
        match page {
            Some(page) => report.line(format!("--- Quote #{} (page {}) ---", i + 1, page)),
            None => report.line(format!("--- Quote #{} ---", i + 1)),
        }
        report.field("Text", &quote.text);
        report.field("Author", &quote.author);
        report.field("Tags", format!("{:?}", quote.tags));
    }
}

async fn first_text<B: Browser>(browser: &mut B, scope: &B::Element, locator: &Locator) -> Result<String> {
    let found = browser.find_all(Some(scope), locator).await?;
    let element = found.first().with_context(|| format!("No element matches {}", locator.to_css()))?;
    browser.text(element).await
}
