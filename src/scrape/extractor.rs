// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page-to-blocks extraction pipeline
//!
//! Runs parser selection, tree construction, region location and
//! classification for one fetched page. Strictly sequential; the tree is
//! dropped once blocks are extracted.

use tracing::{debug, info};

use super::classifier::extract_blocks;
use super::locator::locate_content_root;
use super::parse_mode::{ParseMode, ParserSelector};
use super::parser::{decode_body, parse_document};
use super::title::extract_title;
use super::types::{ExtractError, ExtractionResult, FetchResult};

/// Extractor holding the parser selection rules
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    selector: ParserSelector,
}

impl Extractor {
    pub fn new(selector: ParserSelector) -> Self {
        Self { selector }
    }

    /// Extract title and blocks from a fetched page
    pub fn extract(&self, page: &FetchResult) -> Result<ExtractionResult, ExtractError> {
        let content_type = page.declared_content_type.as_deref();
        let mode = self.selector.select(content_type, &page.source_url);
        info!("Using parser mode: {} for {}", mode, page.source_url);

        let markup = decode_body(&page.raw_body, content_type);
        extract_from_markup(&markup, mode)
    }
}

/// Extract title and blocks from already decoded markup
pub fn extract_from_markup(
    markup: &str,
    mode: ParseMode,
) -> Result<ExtractionResult, ExtractError> {
    let tree = parse_document(markup, mode)?;
    let title = extract_title(&tree);
    let content_root = locate_content_root(&tree)?;
    let blocks = extract_blocks(&tree, content_root);

    if blocks.is_empty() {
        return Err(ExtractError::NoContent);
    }

    debug!(
        "Extracted content. Title length: {}, Content blocks: {}",
        title.chars().count(),
        blocks.len()
    );

    Ok(ExtractionResult { title, blocks })
}
