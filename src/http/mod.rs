//! HTTP plumbing: header sets and the retrying fetcher.

pub mod fetcher;
pub mod headers;

pub use fetcher::{classify, FetchOptions, FetchOutcome, Fetcher, Response, RetryPolicy, StatusClass};
pub use headers::HeaderSet;
