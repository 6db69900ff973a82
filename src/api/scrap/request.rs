// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scrap API request types

use serde::{Deserialize, Serialize};

/// Request body for POST /scrap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapRequest {
    /// URL of the page to extract (required)
    #[serde(default)]
    pub source: Option<String>,
}

impl ScrapRequest {
    /// Validate the request and return the trimmed source URL
    pub fn validate(&self) -> Result<&str, String> {
        match self.source.as_deref().map(str::trim) {
            Some(source) if !source.is_empty() => Ok(source),
            _ => Err("No source URL provided".to_string()),
        }
    }
}
