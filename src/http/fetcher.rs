//! Retrying HTTP GET built on wreq.
//!
//! One request is in flight at a time. Failures are split into two classes:
//! definitive (4xx other than 429) stops immediately, transient (network
//! errors, 429, 5xx) sleeps `step * attempt` and tries again until the
//! attempt budget runs out.

use crate::config::Config;
use crate::http::headers::HeaderSet;
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// How a response status is treated by the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx/3xx, or anything outside the 4xx/5xx error ranges.
    Success,
    /// 4xx other than 429. Retrying would not help.
    Definitive,
    /// 429 or 5xx.
    Transient,
}

/// Classifies an HTTP status code.
pub fn classify(status: u16) -> StatusClass {
    match status {
        429 => StatusClass::Transient,
        400..=499 => StatusClass::Definitive,
        500..=599 => StatusClass::Transient,
        _ => StatusClass::Success,
    }
}

/// Attempt budget and linear backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, backoff_step: Duration::from_millis(1500) }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self { max_attempts, backoff_step }
    }

    /// Sleep after a failed `attempt` (1-based): 1.5s, 3.0s, 4.5s, ... by default.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

/// Per-call fetch parameters.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Covers sending the request and reading the whole body.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Base header set; a per-call override is merged on top of it.
    pub headers: HeaderSet,
}

impl FetchOptions {
    pub fn new(timeout: Duration, retry: RetryPolicy, headers: HeaderSet) -> Self {
        Self { timeout, retry, headers }
    }

    /// Builds options from configuration, with the given timeout in seconds.
    ///
    /// The config `headers` table is merged over the browser defaults.
    pub fn from_config(config: &Config, timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy::new(
                config.max_attempts,
                Duration::from_millis(config.backoff_step_ms),
            ),
            headers: HeaderSet::browser_defaults().merge(Some(&config.headers)),
        }
    }
}

/// A successfully received response, body decoded as UTF-8.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Final URL after redirects.
    pub url: String,
    pub headers: HeaderSet,
    pub body: String,
}

impl Response {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("Response body is not valid JSON")
    }
}

/// Result of a fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Response),
    /// Non-transient client error; no retry was made.
    Definitive { status: u16 },
    /// Every attempt failed transiently.
    Exhausted { attempts: u32 },
}

impl FetchOutcome {
    /// Collapses the outcome to "response or nothing".
    pub fn into_response(self) -> Option<Response> {
        match self {
            FetchOutcome::Fetched(response) => Some(response),
            _ => None,
        }
    }
}

/// HTTP fetcher with retry and backoff.
pub struct Fetcher {
    client: Client,
    impersonate: bool,
}

impl Fetcher {
    /// Creates a fetcher configured from `config` (proxy, impersonation).
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(wreq::redirect::Policy::limited(10))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, impersonate: config.impersonate })
    }

    /// GETs `url`, retrying transient failures.
    ///
    /// Never returns an error: network failures are folded into the retry
    /// loop and surface as [`FetchOutcome::Exhausted`] once the budget is spent.
    pub async fn fetch(
        &self,
        url: &str,
        options: &FetchOptions,
        headers_override: Option<&HeaderSet>,
    ) -> FetchOutcome {
        let headers = options.headers.merge(headers_override);
        let max_attempts = options.retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            debug!("GET {} (attempt {}/{})", url, attempt, max_attempts);

            match self.attempt(url, &headers, options.timeout).await {
                Ok(response) => match classify(response.status) {
                    StatusClass::Success => {
                        info!("Fetched {} ({})", url, response.status);
                        return FetchOutcome::Fetched(response);
                    }
                    StatusClass::Definitive => {
                        warn!("{} returned {}, not retrying", url, response.status);
                        return FetchOutcome::Definitive { status: response.status };
                    }
                    StatusClass::Transient => {
                        warn!("{} returned {} (attempt {})", url, response.status, attempt);
                    }
                },
                Err(e) => {
                    warn!("Request to {} failed (attempt {}): {:#}", url, attempt, e);
                }
            }

            let delay = options.retry.delay_for(attempt);
            debug!("Backing off {:?}", delay);
            tokio::time::sleep(delay).await;
        }

        warn!("Giving up on {} after {} attempts", url, max_attempts);
        FetchOutcome::Exhausted { attempts: max_attempts }
    }

    /// One GET, bounded by `timeout` end to end.
    async fn attempt(&self, url: &str, headers: &HeaderSet, timeout: Duration) -> Result<Response> {
        let mut request = self.client.get(url);
        if self.impersonate {
            request = request.emulation(Emulation::Chrome131);
        }
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }

        let exchange = async {
            let response = request.send().await.context("Failed to send request")?;

            let status = response.status().as_u16();
            let final_url = response.uri().to_string();
            let response_headers: HeaderSet = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();

            let bytes = response.bytes().await.context("Failed to read response body")?;

            Ok::<_, anyhow::Error>(Response {
                status,
                url: final_url,
                headers: response_headers,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            })
        };

        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| anyhow!("Timed out after {:?}", timeout))?
    }
}
