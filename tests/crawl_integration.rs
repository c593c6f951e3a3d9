//! End-to-end crawl against a mock catalog server.

use std::time::Duration;
use tempfile::TempDir;
use toscrape::books::{CatalogSource, Crawler, HttpCatalog, Politeness, StopReason};
use toscrape::commands::BooksCommand;
use toscrape::config::{Config, OutputFormat};
use toscrape::http::{FetchOptions, Fetcher, HeaderSet, RetryPolicy};
use toscrape::{Book, Report};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product(title: &str, price: &str, rating: &str) -> String {
    format!(
        r#"<article class="product_pod">
            <p class="star-rating {rating}"></p>
            <h3><a href="{title}_1/index.html" title="{title}">{title}</a></h3>
            <p class="price_color">{price}</p>
            <p class="instock availability">In stock</p>
        </article>"#
    )
}

fn listing(products: &[String]) -> String {
    format!("<html><body><ol class=\"row\">{}</ol></body></html>", products.join(""))
}

fn make_catalog(server: &MockServer) -> HttpCatalog {
    let config = Config::default();
    let fetcher = Fetcher::new(&config).unwrap();
    let options = FetchOptions::new(
        Duration::from_secs(5),
        RetryPolicy::new(3, Duration::from_millis(1)),
        HeaderSet::browser_defaults(),
    );
    HttpCatalog::new(fetcher, options, format!("{}/catalogue/page-{{}}.html", server.uri()))
}

#[tokio::test]
async fn test_crawl_two_pages_then_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[
            product("Alpha", "£10.00", "Two"),
            product("Beta", "£20.00", "Four"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-3.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[product("Never", "£1.00", "One")])))
        .expect(0)
        .mount(&server)
        .await;

    let catalog = make_catalog(&server);
    assert!(catalog.page_url(7).ends_with("/catalogue/page-7.html"));

    let mut report = Report::new();
    let result = Crawler::new(Politeness::none()).crawl(&catalog, &mut report).await.unwrap();

    assert_eq!(result.books.len(), 2);
    assert_eq!(result.books[0].title, "Alpha");
    assert_eq!(result.books[1].rating, Some(4));
    assert_eq!(result.last_page, 2);
    assert_eq!(result.stop_reason, StopReason::EmptyPage);
}

#[tokio::test]
async fn test_crawl_stops_on_missing_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[product("Alpha", "£10.00", "One")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = make_catalog(&server);
    let mut report = Report::new();
    let result = Crawler::new(Politeness::none()).crawl(&catalog, &mut report).await.unwrap();

    assert_eq!(result.books.len(), 1);
    assert_eq!(result.stop_reason, StopReason::NoResponse);
    assert!(report.contents().contains("No response (missing page or definitive error). Stopping."));
}

#[tokio::test]
async fn test_crawl_retries_transient_page_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[product("Alpha", "£10.00", "One")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let catalog = make_catalog(&server);
    let mut report = Report::new();
    let result = Crawler::new(Politeness::none()).crawl(&catalog, &mut report).await.unwrap();

    assert_eq!(result.books.len(), 1);
    assert_eq!(result.stop_reason, StopReason::NoResponse);
}

#[tokio::test]
async fn test_books_command_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing(&[
            product("Alpha", "Â£10.00", "Two"),
            product("Beta, the sequel", "£99.90", "Two"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.books_url = format!("{}/catalogue/page-{{}}.html", server.uri());
    config.output_dir = dir.path().to_path_buf();
    config.backoff_step_ms = 1;
    config.delay_min_ms = 0;
    config.delay_max_ms = 0;
    config.format = OutputFormat::Json;

    let output = BooksCommand::new(config).execute().await.unwrap();
    let printed: Vec<Book> = serde_json::from_str(&output).unwrap();
    assert_eq!(printed.len(), 2);

    let csv = std::fs::read_to_string(dir.path().join("books.csv")).unwrap();
    assert!(csv.contains("\"Beta, the sequel\",99.9,true,2,"));

    let transcript = std::fs::read_to_string(dir.path().join("books_output.txt")).unwrap();
    assert!(transcript.contains("Total books extracted: 2"));
    assert!(transcript.contains("  2: 2"));
}
