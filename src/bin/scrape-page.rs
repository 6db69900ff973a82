// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::{ArgAction, Parser};
use content_scraper::{
    api::{ApiError, ErrorResponse},
    scrape::{config::DEFAULT_USER_AGENT, Extractor, PageFetcher, ParserSelector, ScraperConfig},
    ScrapResponse,
};
use tracing_subscriber::EnvFilter;

/// Extract the title and content blocks of a single page
#[derive(Parser, Debug)]
#[command(name = "scrape-page")]
#[command(version)]
#[command(about = "Print the scrap response body for one URL", long_about = None)]
struct Args {
    /// Page URL
    source: String,

    /// Fetch timeout in seconds
    #[arg(long, env = "SCRAPER_TIMEOUT_SECS", default_value_t = 15)]
    timeout_secs: u64,

    /// User-Agent header sent to the origin
    #[arg(long, env = "SCRAPER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Maximum response body size in bytes
    #[arg(long, env = "SCRAPER_MAX_BODY_BYTES", default_value_t = 10 * 1024 * 1024)]
    max_body_bytes: usize,

    /// Hosts read with the literal HTML parser
    #[arg(
        long,
        env = "SCRAPER_STRICT_HTML_HOSTS",
        value_delimiter = ',',
        default_value = "increment.com"
    )]
    strict_html_hosts: Vec<String>,

    /// Reject loopback, private and link-local hosts
    #[arg(
        long,
        env = "SCRAPER_BLOCK_PRIVATE_HOSTS",
        action = ArgAction::Set,
        default_value_t = true
    )]
    block_private_hosts: bool,
}

impl From<Args> for ScraperConfig {
    fn from(args: Args) -> Self {
        Self {
            timeout_secs: args.timeout_secs,
            user_agent: args.user_agent,
            max_body_bytes: args.max_body_bytes,
            strict_html_hosts: args
                .strict_html_hosts
                .iter()
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
            block_private_hosts: args.block_private_hosts,
            ..ScraperConfig::default()
        }
    }
}

async fn scrape(source: &str, config: &ScraperConfig) -> Result<ScrapResponse, ApiError> {
    let fetcher = PageFetcher::new(config).map_err(|e| ApiError::Internal(e.to_string()))?;
    let extractor = Extractor::new(ParserSelector::with_strict_html_hosts(
        config.strict_html_hosts.clone(),
    ));

    let page = fetcher.fetch(source).await?;
    let result = extractor.extract(&page)?;
    ScrapResponse::from_extraction(&result).map_err(|e| ApiError::Internal(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries only the response body
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let source = args.source.clone();
    let config = ScraperConfig::from(args);
    if let Err(e) = config.validate() {
        eprintln!("❌ Invalid configuration: {}", e);
        std::process::exit(2);
    }

    match scrape(&source, &config).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            let body: ErrorResponse = e.to_response();
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            std::process::exit(1);
        }
    }
}
