// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::handlers::health_handler;
use super::scrap::scrap_handler;
use crate::scrape::{Extractor, PageFetcher, ParserSelector, ScraperConfig};

/// Handles shared by every request, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<PageFetcher>,
    pub extractor: Arc<Extractor>,
}

impl AppState {
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let fetcher = PageFetcher::new(config)?;
        let selector = ParserSelector::with_strict_html_hosts(config.strict_html_hosts.clone());

        Ok(Self {
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(Extractor::new(selector)),
        })
    }
}

/// Build the router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/scrap", post(scrap_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the listener and serve until Ctrl+C or SIGTERM
pub async fn start_server(config: ScraperConfig) -> anyhow::Result<()> {
    let state = AppState::new(&config).context("Failed to build HTTP client")?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!("Scraper API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Scraper API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
