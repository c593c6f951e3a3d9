//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::http::HeaderSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-attempt timeout for single-page requests, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Per-attempt timeout while crawling the catalog, in seconds
    #[serde(default = "default_crawl_timeout_secs")]
    pub crawl_timeout_secs: u64,

    /// Attempts per request before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit; the n-th retry waits n times this long
    #[serde(default = "default_backoff_step_ms")]
    pub backoff_step_ms: u64,

    /// Lower bound of the pause between catalog pages
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,

    /// Upper bound (exclusive) of the pause between catalog pages
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,

    /// Stop the crawl after this many pages
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Directory for transcripts and exports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Output format for printed results
    #[serde(default)]
    pub format: OutputFormat,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Emulate a browser TLS fingerprint
    #[serde(default)]
    pub impersonate: bool,

    /// Headers merged over the browser defaults
    #[serde(default)]
    pub headers: HeaderSet,

    /// Catalog page URL, `{}` is replaced by the page number
    #[serde(default = "default_books_url")]
    pub books_url: String,

    #[serde(default = "default_quotes_url")]
    pub quotes_url: String,

    /// JavaScript-rendered quotes, for browser-driven extraction
    #[serde(default = "default_quotes_js_url")]
    pub quotes_js_url: String,

    /// Echo endpoint for request inspection
    #[serde(default = "default_httpbin_url")]
    pub httpbin_url: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_crawl_timeout_secs() -> u64 {
    15
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_step_ms() -> u64 {
    1500
}

fn default_delay_min_ms() -> u64 {
    1000
}

fn default_delay_max_ms() -> u64 {
    3000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_books_url() -> String {
    "http://books.toscrape.com/catalogue/page-{}.html".to_string()
}

fn default_quotes_url() -> String {
    "http://quotes.toscrape.com".to_string()
}

fn default_quotes_js_url() -> String {
    "http://quotes.toscrape.com/js/".to_string()
}

fn default_httpbin_url() -> String {
    "http://httpbin.org/get".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            crawl_timeout_secs: default_crawl_timeout_secs(),
            max_attempts: default_max_attempts(),
            backoff_step_ms: default_backoff_step_ms(),
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            max_pages: None,
            output_dir: default_output_dir(),
            format: OutputFormat::Table,
            proxy: None,
            impersonate: false,
            headers: HeaderSet::new(),
            books_url: default_books_url(),
            quotes_url: default_quotes_url(),
            quotes_js_url: default_quotes_js_url(),
            httpbin_url: default_httpbin_url(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("toscrape").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("TOSCRAPE_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(timeout) = std::env::var("TOSCRAPE_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(dir) = std::env::var("TOSCRAPE_OUTPUT_DIR") {
            if !dir.is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }

        self
    }

    /// Path of a transcript file inside the output directory.
    pub fn transcript_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}_output.txt", name))
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
