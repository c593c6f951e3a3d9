//! Exercise drivers: each command runs one exercise and writes its transcript.

pub mod books;
pub mod http;
pub mod js_quotes;
pub mod quotes;

pub use books::BooksCommand;
pub use http::HttpCommand;
pub use js_quotes::{JsQuotesCommand, JsQuotesRun};
pub use quotes::QuotesCommand;

use crate::http::FetchOutcome;

/// One-line description of a fetch that produced no response.
pub(crate) fn describe_failure(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Fetched(response) => format!("status {}", response.status),
        FetchOutcome::Definitive { status } => format!("definitive error (status {})", status),
        FetchOutcome::Exhausted { attempts } => format!("gave up after {} attempts", attempts),
    }
}
