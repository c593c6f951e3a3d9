//! Run transcripts.
//!
//! Drivers append lines to a [`Report`] while they work and write it out
//! once at the end of the run.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;
use tracing::debug;

const BANNER_RULE: &str =
    "#######################################################################";

/// Accumulated transcript text.
#[derive(Debug, Default, Clone)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a report with a banner title.
    pub fn titled(title: &str) -> Self {
        let mut report = Self::new();
        report.banner(title);
        report
    }

    /// A boxed title block followed by a blank line.
    pub fn banner(&mut self, title: &str) {
        self.line(BANNER_RULE);
        self.line(format!("# {}", title));
        self.line(BANNER_RULE);
        self.blank();
    }

    /// A `==== title ====` separator preceded by a blank line.
    pub fn section(&mut self, title: impl Display) {
        self.blank();
        self.line(format!("==================== {} ====================", title));
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// `label: value`
    pub fn field(&mut self, label: &str, value: impl Display) {
        self.line(format!("{}: {}", label, value));
    }

    /// `label:` followed by the value as pretty JSON.
    pub fn json(&mut self, label: &str, value: &impl Serialize) {
        let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
        self.line(format!("{}:", label));
        self.line(rendered);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Full transcript text, newline-terminated.
    pub fn contents(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Writes the transcript to any sink.
    pub fn flush_to(&self, sink: &mut impl Write) -> Result<()> {
        sink.write_all(self.contents().as_bytes()).context("Failed to write transcript")?;
        sink.flush().context("Failed to flush transcript")
    }

    /// Writes the transcript to `path` as UTF-8, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create transcript: {}", path.display()))?;
        self.flush_to(&mut file)?;

        debug!("Wrote {} transcript lines to {}", self.lines.len(), path.display());
        Ok(())
    }
}
