//! Static selector walkthrough over a quote listing page.

use crate::commands::describe_failure;
use crate::config::Config;
use crate::http::{FetchOptions, FetchOutcome, Fetcher};
use crate::quotes::QuotePage;
use crate::report::Report;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Fetches the quote page and records every selector query.
pub struct QuotesCommand {
    config: Config,
}

impl QuotesCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the walkthrough and returns the transcript path.
    pub async fn execute(&self) -> Result<PathBuf> {
        let fetcher = Fetcher::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_fetcher(&fetcher).await
    }

    /// Runs the walkthrough with a provided fetcher (for testing).
    pub async fn execute_with_fetcher(&self, fetcher: &Fetcher) -> Result<PathBuf> {
        let url = &self.config.quotes_url;
        let options = FetchOptions::from_config(&self.config, self.config.timeout_secs);

        let html = match fetcher.fetch(url, &options, None).await {
            FetchOutcome::Fetched(response) => response.body,
            failed => anyhow::bail!("No response from {}: {}", url, describe_failure(&failed)),
        };

        let mut report = Report::titled("Exercise 2 - Selectors");
        report.field("URL", url);
        write_selectors(&mut report, &QuotePage::parse(&html));

        let path = self.config.transcript_path("quotes");
        report.write_to(&path)?;

        info!("Transcript written to {}", path.display());
        Ok(path)
    }
}

/// Writes every query of the walkthrough against `page`.
fn write_selectors(report: &mut Report, page: &QuotePage) {
    report.section("Listing queries");

    list(report, "All quotes", &page.quote_texts());
    list(report, "All authors", &page.authors());
    list(report, "All tags", &page.tags());

    single(report, "First author on the page", page.first_author());
    single(report, "First quote", page.first_quote());
    single(report, "'Next' link (if any)", page.next_href());

    report.section("Scoped queries");

    report.blank();
    report.line("Tags inside each quote:");
    for (i, tags) in page.tags_per_quote().iter().enumerate() {
        report.line(format!("Quote #{} -> {:?}", i + 1, tags));
    }

    single(report, "Author of the first quote (CSS hierarchy)", page.first_quote_author());

    report.section("Attributes");

    for (i, details) in page.details().iter().enumerate() {
        report.blank();
        report.line(format!("--- Quote #{} ---", i + 1));
        report.field("Text", &details.text);
        report.field("Author", &details.author);
        report.field("About href", details.about_href.as_deref().unwrap_or("None"));
        report.field("Tag count", details.tag_count);
        report.field("Classes of div.quote", format!("{:?}", details.classes));
    }
}

fn list(report: &mut Report, title: &str, items: &[String]) {
    report.blank();
    report.line(format!("{}:", title));
    for item in items {
        report.line(item.as_str());
    }
}

fn single(report: &mut Report, title: &str, value: Option<String>) {
    report.blank();
    report.field(title, value.as_deref().unwrap_or("None"));
}
