//! Output formatting for books (table, JSON, markdown, CSV).

use crate::books::Book;
use crate::config::OutputFormat;

/// Formats books for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats multiple books.
    pub fn format_books(&self, books: &[Book]) -> String {
        if books.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_header().to_string(),
                _ => "No books found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_books(books),
            OutputFormat::Table => self.table_books(books),
            OutputFormat::Markdown => self.markdown_books(books),
            OutputFormat::Csv => self.csv_books(books),
        }
    }

    // JSON formatting

    fn json_books(&self, books: &[Book]) -> String {
        serde_json::to_string_pretty(books).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_books(&self, books: &[Book]) -> String {
        let price_width = 8;
        let rating_width = 6;
        let stock_width = 5;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "Price", "Rating", "Stock", "Title"
        ));
        lines.push(format!(
            "{:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for book in books {
            let stock = if book.available { "Yes" } else { "No" };
            lines.push(format!(
                "{:>price_width$}  {:>rating_width$}  {:<stock_width$}  {}",
                format!("{:.2}", book.price),
                rating_label(book.rating),
                stock,
                truncate(&book.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} books", books.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_books(&self, books: &[Book]) -> String {
        let mut lines = Vec::new();

        lines.push("| Price | Rating | Stock | Title |".to_string());
        lines.push("|-------|--------|-------|-------|".to_string());

        for book in books {
            let stock = if book.available { "✓" } else { "" };
            lines.push(format!(
                "| {:.2} | {} | {} | [{}]({}) |",
                book.price,
                rating_label(book.rating),
                stock,
                truncate(&book.title, 40),
                book.relative_url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} books found*", books.len()));

        lines.join("\n")
    }

    // CSV formatting

    /// Column order of the CSV export.
    pub fn csv_header() -> &'static str {
        "title,price,available,rating,relative_url"
    }

    fn csv_books(&self, books: &[Book]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::csv_header().to_string());

        for book in books {
            lines.push(format!(
                "{},{},{},{},{}",
                Self::csv_escape(&book.title),
                book.price,
                book.available,
                book.rating.map(|r| r.to_string()).unwrap_or_default(),
                Self::csv_escape(&book.relative_url)
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn rating_label(rating: Option<u8>) -> String {
    rating.map(|r| format!("{}/5", r)).unwrap_or_else(|| "N/A".to_string())
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        let head: String = title.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}
