//! Browser-driven extraction from the JavaScript-rendered quote pages.
//!
//! There is no CLI entry point for this command: callers bring their own
//! [`Browser`] session and hand it to [`JsQuotesCommand::execute_with_browser`].

use crate::config::Config;
use crate::export;
use crate::quotes::browser::write_quotes;
use crate::quotes::selectors::class;
use crate::quotes::{extract_hybrid, extract_live, paginate, Browser, Locator, PaginationSettings, Quote};
use crate::report::Report;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Files and records produced by a run.
#[derive(Debug, Clone)]
pub struct JsQuotesRun {
    /// Quotes gathered across every page, in page order.
    pub quotes: Vec<Quote>,
    pub transcript: PathBuf,
    pub json: PathBuf,
}

/// Runs live, hybrid and paginated extraction in one browser session.
pub struct JsQuotesCommand {
    config: Config,
    settings: PaginationSettings,
}

impl JsQuotesCommand {
    pub fn new(config: Config) -> Self {
        Self { config, settings: PaginationSettings::default() }
    }

    pub fn with_settings(mut self, settings: PaginationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Drives `browser` through the exercise and quits it afterwards,
    /// whether or not the run succeeded.
    pub async fn execute_with_browser<B: Browser>(&self, browser: &mut B) -> Result<JsQuotesRun> {
        let transcript = self.config.transcript_path("quotes_js");
        let mut report = Report::titled("Exercise 4 - Browser (JavaScript site)");

        let run = self.run(browser, &mut report).await;
        let quit = browser.quit().await.context("Failed to close the browser");

        let outcome = match (run, quit) {
            (Ok(quotes), Ok(())) => self.export(quotes, &mut report),
            (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        };
        report.write_to(&transcript)?;

        let (quotes, json) = outcome?;
        info!("Collected {} quotes, written to {}", quotes.len(), json.display());

        Ok(JsQuotesRun { quotes, transcript, json })
    }

    /// Writes the JSON export and records the outcome in the transcript.
    fn export(&self, quotes: Vec<Quote>, report: &mut Report) -> Result<(Vec<Quote>, PathBuf)> {
        match export::write_quotes(&self.config.output_dir, &quotes) {
            Ok(json) => {
                report.field("JSON written to", json.display());
                Ok((quotes, json))
            }
            Err(e) => {
                report.field("JSON export failed", format!("{:#}", e));
                Err(e)
            }
        }
    }

    async fn run<B: Browser>(&self, browser: &mut B, report: &mut Report) -> Result<Vec<Quote>> {
        let url = &self.config.quotes_js_url;
        let quote_locator = Locator::class(class::QUOTE);

        report.line("Live extraction (element queries)");
        browser.navigate(url).await.with_context(|| format!("Failed to open {}", url))?;
        browser.wait_for(&quote_locator, self.settings.wait_timeout).await?;
        let live = extract_live(browser).await?;
        report.field("Total quotes extracted", live.len());
        write_quotes(report, &live, None);

        report.blank();
        report.blank();
        report.line("Hybrid extraction (page source -> HTML parser)");
        let hybrid = extract_hybrid(browser).await?;
        report.field("Total quotes extracted", hybrid.len());
        write_quotes(report, &hybrid, None);

        report.blank();
        report.blank();
        report.line("Pagination (Next)");
        let all = paginate(browser, url, &self.settings, report).await?;

        report.blank();
        report.banner("Final summary");
        report.field("Total quotes collected while paginating", all.len());

        Ok(all)
    }
}
