//! Request/response inspection command.

use crate::commands::describe_failure;
use crate::config::Config;
use crate::http::{FetchOptions, FetchOutcome, Fetcher};
use crate::inspect::Echo;
use crate::report::Report;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Sends one GET to the echo endpoint and records what the server saw.
pub struct HttpCommand {
    config: Config,
}

impl HttpCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the inspection and returns the transcript path.
    pub async fn execute(&self) -> Result<PathBuf> {
        let fetcher = Fetcher::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_fetcher(&fetcher).await
    }

    /// Runs the inspection with a provided fetcher (for testing).
    ///
    /// The transcript is written even when the request fails; the error
    /// then names the transcript path.
    pub async fn execute_with_fetcher(&self, fetcher: &Fetcher) -> Result<PathBuf> {
        let path = self.config.transcript_path("http");
        let mut report = Report::titled("Exercise 1 - HTTP");

        let outcome = self.inspect(fetcher, &mut report).await;
        report.write_to(&path)?;
        outcome.with_context(|| format!("Request failed. See the transcript: {}", path.display()))?;

        info!("Transcript written to {}", path.display());
        Ok(path)
    }

    async fn inspect(&self, fetcher: &Fetcher, report: &mut Report) -> Result<()> {
        let url = &self.config.httpbin_url;
        let options = FetchOptions::from_config(&self.config, self.config.timeout_secs);

        report.field("URL", url);
        report.json("Headers sent", &options.headers);

        let response = match fetcher.fetch(url, &options, None).await {
            FetchOutcome::Fetched(response) => response,
            failed => {
                report.blank();
                report.line("Request failed (definitive error or attempts exhausted).");
                anyhow::bail!("No response from {}: {}", url, describe_failure(&failed));
            }
        };

        report.blank();
        report.field("Status code", response.status);
        report.field("Content-Type", response.content_type().unwrap_or("None"));

        let raw: serde_json::Value = response.json()?;
        report.blank();
        report.json("Full JSON returned by the echo endpoint", &raw);

        let echo: Echo =
            serde_json::from_value(raw).context("Echo body does not have the expected shape")?;

        report.blank();
        report.field("Client IP (origin)", &echo.origin);
        report.field("IP (normalized)", echo.normalized_origin());

        report.blank();
        report.json("Headers received by the server", &echo.headers);

        report.blank();
        report.line("Header validation:");
        for check in echo.verify(&options.headers) {
            report.line(format!("{} received equals sent? -> {}", check.name, check.matches));
        }

        Ok(())
    }
}
