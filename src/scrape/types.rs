// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for page extraction

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title used when no candidate element yields text
pub const UNTITLED: &str = "Untitled Content";

/// Raw response of a single page fetch
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Response body as received
    pub raw_body: Vec<u8>,
    /// Value of the `Content-Type` response header, if any
    pub declared_content_type: Option<String>,
    /// URL that was requested
    pub source_url: String,
}

/// One classified unit of extracted content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A code sample with its detected language (`plain` when unknown)
    Code { content: String, language: String },
    /// A prose paragraph
    Text { content: String },
}

impl ContentBlock {
    pub fn content(&self) -> &str {
        match self {
            Self::Code { content, .. } | Self::Text { content } => content,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Self::Code { .. })
    }
}

/// Title plus ordered blocks extracted from one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub title: String,
    /// Never empty
    pub blocks: Vec<ContentBlock>,
}

/// Errors raised after a page was fetched
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Parsing worked but no block survived classification
    #[error("No content found on the page")]
    NoContent,

    /// Neither a content region nor a body element exists
    #[error("Document has no body element")]
    MissingBody,

    /// Markup rejected by the selected parser
    #[error("Markup parse error: {0}")]
    Markup(String),
}

impl From<quick_xml::Error> for ExtractError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Markup(e.to_string())
    }
}
