// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use content_scraper::{api::start_server, ScraperConfig};
use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rotated log files kept in LOG_DIR
const MAX_LOG_FILES: usize = 10;

/// Console logging, plus a daily-rotated file when `log_dir` is set
///
/// The returned guard flushes the file writer on drop and must live until exit.
fn init_logging(log_dir: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("content-scraper")
                .filename_suffix("log")
                .max_log_files(MAX_LOG_FILES)
                .build(dir)
                .with_context(|| format!("Failed to open log directory {}", dir))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    let config = ScraperConfig::from_env();
    let _log_guard = init_logging(config.log_dir.as_deref())?;

    config
        .validate()
        .map_err(|e| anyhow!("Invalid scraper configuration: {}", e))?;

    info!(
        "Starting content scraper (timeout: {}s, max body: {} bytes, strict html hosts: {:?})",
        config.timeout_secs, config.max_body_bytes, config.strict_html_hosts
    );
    if let Some(dir) = &config.log_dir {
        info!("Writing logs to {}", dir);
    }

    start_server(config).await
}
