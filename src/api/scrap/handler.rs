// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scrap API endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{error, info};

use super::request::ScrapRequest;
use super::response::ScrapResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::scrape::ExtractError;

/// POST /scrap - Extract title and content blocks from a page
///
/// # Request
/// - `source`: URL of the page (required)
///
/// # Response
/// - `title`: Page title or "Untitled Content"
/// - `content`: JSON-encoded string of `{type, content, language?}` blocks
///
/// # Errors
/// - 400 Bad Request: Missing/invalid source, or no content found
/// - 500 Internal Server Error: Fetch failed or unexpected failure
pub async fn scrap_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScrapRequest>, JsonRejection>,
) -> Result<Json<ScrapResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        error!("Invalid scrap request body: {}", rejection.body_text());
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let url = request.validate().map_err(|e| {
        error!("{}", e);
        ApiError::Validation(e)
    })?;

    info!("Scraping content from: {}", url);

    let page = state.fetcher.fetch(url).await.map_err(|e| {
        error!("Request failed: {}", e);
        ApiError::from(e)
    })?;

    // Tree building is CPU-bound; keep it off the async workers
    let extractor = state.extractor.clone();
    let result = tokio::task::spawn_blocking(move || extractor.extract(&page))
        .await
        .map_err(|e| {
            error!("Extraction task failed: {:?}", e);
            ApiError::Internal(e.to_string())
        })?
        .map_err(|e| {
            match &e {
                ExtractError::NoContent => error!("No content found at {}", url),
                other => error!("Scraping failed for {}: {:?}", url, other),
            }
            ApiError::from(e)
        })?;

    let response = ScrapResponse::from_extraction(&result).map_err(|e| {
        error!("Failed to encode content blocks: {:?}", e);
        ApiError::Internal(e.to_string())
    })?;

    info!(
        "Successfully scraped content. Title length: {}, Content blocks: {}",
        result.title.chars().count(),
        result.blocks.len()
    );

    Ok(Json(response))
}
