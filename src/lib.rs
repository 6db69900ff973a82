// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod collaborators;
pub mod scrape;

pub use api::{create_app, start_server, AppState, ScrapRequest, ScrapResponse};
pub use scrape::{
    extract_from_markup, ContentBlock, ExtractError, ExtractionResult, Extractor, FetchError,
    FetchResult, PageFetcher, ParseMode, ScraperConfig,
};
