// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scrap API response types

use serde::{Deserialize, Serialize};

use crate::scrape::ExtractionResult;

/// Response body for POST /scrap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapResponse {
    /// Page title, or the untitled sentinel
    pub title: String,

    /// Blocks as a JSON-encoded string (a string holding JSON, not nested JSON)
    pub content: String,
}

impl ScrapResponse {
    /// Assemble the response from an extraction result
    pub fn from_extraction(result: &ExtractionResult) -> Result<Self, serde_json::Error> {
        Ok(Self {
            title: result.title.clone(),
            content: serde_json::to_string_pretty(&result.blocks)?,
        })
    }
}
