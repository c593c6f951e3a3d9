//! Catalog crawl command.

use crate::books::{CatalogSource, CatalogSummary, Crawler, HttpCatalog};
use crate::config::Config;
use crate::export;
use crate::format::Formatter;
use crate::report::Report;
use anyhow::Result;
use tracing::info;

/// Crawls the book catalog, exports it, and summarizes it.
pub struct BooksCommand {
    config: Config,
}

impl BooksCommand {
    /// Creates a new books command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Crawls the configured catalog and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let catalog = HttpCatalog::from_config(&self.config)?;
        self.execute_with_source(&catalog).await
    }

    /// Crawls a provided catalog source (for testing).
    ///
    /// The transcript is written even if a page fails to extract.
    pub async fn execute_with_source(&self, source: &impl CatalogSource) -> Result<String> {
        let mut report = Report::titled("Exercise 3 - Pagination / Crawling (books.toscrape.com)");
        let crawler = Crawler::from_config(&self.config);

        let transcript = self.config.transcript_path("books");
        let crawl = crawler.crawl(source, &mut report).await;
        let result = match crawl {
            Ok(result) => result,
            Err(e) => {
                report.write_to(&transcript)?;
                return Err(e);
            }
        };

        let exported = export::write_books(&self.config.output_dir, &result.books)?;
        let summary = CatalogSummary::from_books(&result.books);

        report.blank();
        report.banner("Final summary");
        report.field("Stopped at page", result.last_page);
        report.field("Stop reason", format!("{:?}", result.stop_reason));
        report.field("CSV written to", exported.csv.display());
        report.field("JSON written to", exported.json.display());
        report.blank();
        summary.write_to(&mut report);

        report.write_to(&transcript)?;
        info!("Transcript written to {}", transcript.display());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_books(&result.books))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::Book;
    use crate::config::OutputFormat;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;

    /// Mock catalog serving fixed pages; anything past the end is missing.
    struct MockCatalog {
        pages: Vec<String>,
        call_count: AtomicU32,
    }

    impl MockCatalog {
        fn new(pages: Vec<String>) -> Self {
            Self { pages, call_count: AtomicU32::new(0) }
        }

        fn call_count(&self) -> u32 {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource for MockCatalog {
        fn page_url(&self, page: u32) -> String {
            format!("mock://catalogue/page-{}.html", page)
        }

        async fn fetch_page(&self, page: u32) -> Option<String> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.pages.get((page - 1) as usize).cloned()
        }
    }

    fn make_test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.output_dir = dir.path().to_path_buf();
        config.delay_min_ms = 0;
        config.delay_max_ms = 0;
        config
    }

    fn make_page(books: &[(&str, &str, &str, bool)]) -> String {
        let mut html = String::from("<html><body><section><ol class=\"row\">");
        for (title, price, rating, in_stock) in books {
            let stock = if *in_stock { "In stock" } else { "Out of stock" };
            html.push_str(&format!(
                r#"<li><article class="product_pod">
                    <p class="star-rating {2}"><i class="icon-star"></i></p>
                    <h3><a href="{0}_1/index.html" title="{0}">{0}</a></h3>
                    <div class="product_price">
                        <p class="price_color">{1}</p>
                        <p class="instock availability"><i class="icon-ok"></i> {3} </p>
                    </div>
                </article></li>"#,
                title, price, rating, stock
            ));
        }
        html.push_str("</ol></section></body></html>");
        html
    }

    #[tokio::test]
    async fn test_books_command_basic() {
        let dir = TempDir::new().unwrap();
        let source = MockCatalog::new(vec![
            make_page(&[("Alpha", "£10.00", "Three", true), ("Beta", "Â£51.77", "One", false)]),
            make_page(&[("Gamma", "£20.50", "Three", true)]),
        ]);

        let cmd = BooksCommand::new(make_test_config(&dir));
        let output = cmd.execute_with_source(&source).await.unwrap();

        assert!(output.contains("Alpha"));
        assert!(output.contains("51.77"));
        assert!(output.contains("Total: 3 books"));
        // Pages 1, 2 and the missing page 3
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_books_command_writes_transcript_and_exports() {
        let dir = TempDir::new().unwrap();
        let source = MockCatalog::new(vec![make_page(&[
            ("Alpha", "£10.00", "Three", true),
            ("Beta", "£51.77", "One", false),
            ("Gamma", "£51.77", "Three", true),
        ])]);

        let cmd = BooksCommand::new(make_test_config(&dir));
        cmd.execute_with_source(&source).await.unwrap();

        let transcript = std::fs::read_to_string(dir.path().join("books_output.txt")).unwrap();
        assert!(transcript.contains("==================== Page 1 ===================="));
        assert!(transcript.contains("Books extracted on this page: 3"));
        assert!(transcript.contains("==================== Page 2 ===================="));
        assert!(transcript.contains("No response (missing page or definitive error). Stopping."));
        assert!(transcript.contains("# Final summary"));
        assert!(transcript.contains("Stop reason: NoResponse"));
        assert!(transcript.contains("Total books extracted: 3"));
        assert!(transcript.contains("\"title\": \"Beta\""));
        assert!(transcript.contains("Available: 2"));
        assert!(transcript.contains("  1: 1"));
        assert!(transcript.contains("  3: 2"));

        let csv = std::fs::read_to_string(dir.path().join("books.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);

        let json = std::fs::read_to_string(dir.path().join("books.json")).unwrap();
        let books: Vec<Book> = serde_json::from_str(&json).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[1].rating, Some(1));
        assert!(!books[1].available);
    }

    #[tokio::test]
    async fn test_books_command_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let source = MockCatalog::new(vec![make_page(&[])]);

        let cmd = BooksCommand::new(make_test_config(&dir));
        let output = cmd.execute_with_source(&source).await.unwrap();
        assert_eq!(output, "No books found.");

        let transcript = std::fs::read_to_string(dir.path().join("books_output.txt")).unwrap();
        assert!(transcript.contains("No books found. Stopping."));
        assert!(transcript.contains("Total books extracted: 0"));
        assert!(!transcript.contains("Rating distribution"));

        let json = std::fs::read_to_string(dir.path().join("books.json")).unwrap();
        assert_eq!(json, "[]");
    }

    #[tokio::test]
    async fn test_books_command_max_pages() {
        let dir = TempDir::new().unwrap();
        let source = MockCatalog::new(vec![
            make_page(&[("Alpha", "£10.00", "Two", true)]),
            make_page(&[("Beta", "£11.00", "Two", true)]),
        ]);

        let mut config = make_test_config(&dir);
        config.max_pages = Some(1);
        config.format = OutputFormat::Json;

        let output = BooksCommand::new(config).execute_with_source(&source).await.unwrap();
        let books: Vec<Book> = serde_json::from_str(&output).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(source.call_count(), 1);

        let transcript = std::fs::read_to_string(dir.path().join("books_output.txt")).unwrap();
        assert!(transcript.contains("Stop reason: PageLimit"));
    }

    #[tokio::test]
    async fn test_books_command_invalid_price_still_writes_transcript() {
        let dir = TempDir::new().unwrap();
        let source = MockCatalog::new(vec![
            make_page(&[("Alpha", "£10.00", "Two", true)]),
            make_page(&[("Broken", "£abc", "Two", true)]),
        ]);

        let cmd = BooksCommand::new(make_test_config(&dir));
        let err = cmd.execute_with_source(&source).await.unwrap_err();
        assert!(format!("{:#}", err).contains("page 2"));

        let transcript = std::fs::read_to_string(dir.path().join("books_output.txt")).unwrap();
        assert!(transcript.contains("==================== Page 2 ===================="));
        assert!(!dir.path().join("books.csv").exists());
    }
}
