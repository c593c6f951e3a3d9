//! toscrape - Web scraping exercises CLI
//!
//! Runs the HTTP inspection, selector and crawling exercises against the
//! toscrape.com sandboxes, writing transcripts and exports to disk.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toscrape::commands::{BooksCommand, HttpCommand, QuotesCommand};
use toscrape::config::{Config, OutputFormat};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "toscrape",
    version,
    about = "Web scraping exercises against the toscrape.com sandboxes",
    long_about = "Resilient fetching, selector extraction and catalog crawling, with transcripts and CSV/JSON exports."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for transcripts and exports
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "TOSCRAPE_PROXY")]
    proxy: Option<String>,

    /// Output format for printed results
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect what an echo endpoint receives from us
    #[command(alias = "h")]
    Http,

    /// Walk through static selectors on the quotes page
    #[command(alias = "q")]
    Quotes,

    /// Crawl the book catalog and export it
    #[command(alias = "b")]
    Books {
        /// Stop after this many pages
        #[arg(short, long)]
        max_pages: Option<u32>,

        /// Per-attempt timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Skip the pause between pages
        #[arg(long)]
        no_delay: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Http => {
            let path = HttpCommand::new(config).execute().await?;
            println!("[OK] Transcript written to: {}", path.display());
        }

        Commands::Quotes => {
            let path = QuotesCommand::new(config).execute().await?;
            println!("[OK] Transcript written to: {}", path.display());
        }

        Commands::Books { max_pages, timeout, no_delay } => {
            if max_pages.is_some() {
                config.max_pages = max_pages;
            }
            if let Some(timeout) = timeout {
                config.crawl_timeout_secs = timeout;
            }
            if no_delay {
                config.delay_min_ms = 0;
                config.delay_max_ms = 0;
            }

            let output_dir = config.output_dir.clone();
            let output = BooksCommand::new(config).execute().await?;
            println!("{}", output);
            eprintln!("[OK] Transcript, CSV and JSON in: {}", output_dir.display());
        }
    }

    Ok(())
}
