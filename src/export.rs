//! Writing run artifacts (CSV/JSON) into the output directory.

use crate::books::Book;
use crate::config::OutputFormat;
use crate::format::Formatter;
use crate::quotes::Quote;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const BOOKS_CSV: &str = "books.csv";
pub const BOOKS_JSON: &str = "books.json";
pub const QUOTES_JS_JSON: &str = "quotes_js.json";

/// Paths of the files written for a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookExport {
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// Creates `dir` if needed and returns it.
pub fn ensure_output_dir(dir: &Path) -> Result<&Path> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    Ok(dir)
}

/// Writes `books.csv` and `books.json` into `dir`.
pub fn write_books(dir: &Path, books: &[Book]) -> Result<BookExport> {
    ensure_output_dir(dir)?;

    let csv = dir.join(BOOKS_CSV);
    let mut csv_body = Formatter::new(OutputFormat::Csv).format_books(books);
    csv_body.push('\n');
    write_file(&csv, &csv_body)?;

    let json = dir.join(BOOKS_JSON);
    write_json(&json, &books)?;

    info!("Exported {} books to {}", books.len(), dir.display());
    Ok(BookExport { csv, json })
}

/// Writes the browser-collected quotes as a JSON array.
pub fn write_quotes(dir: &Path, quotes: &[Quote]) -> Result<PathBuf> {
    ensure_output_dir(dir)?;
    let path = dir.join(QUOTES_JS_JSON);
    write_json(&path, &quotes)?;
    Ok(path)
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    write_file(path, &body)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
