// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Title extraction over the whole document

use tracing::warn;

use super::document::DocumentTree;
use super::types::UNTITLED;

/// One candidate of the title fallback chain
#[derive(Debug, Clone, Copy)]
pub enum TitleSource {
    /// Text of the first element with this tag
    FirstElementText(&'static str),
    /// `content` of the first `<meta>` whose `property` equals this value
    MetaProperty(&'static str),
}

impl TitleSource {
    fn resolve(&self, tree: &DocumentTree) -> Option<String> {
        let candidate = match self {
            Self::FirstElementText(tag) => tree.find_first_tag(tag).map(|id| tree.text_content(id)),
            Self::MetaProperty(property) => tree
                .find_first(|t, id| {
                    t.tag(id) == Some("meta") && t.attr(id, "property") == Some(*property)
                })
                .and_then(|id| tree.attr(id, "content").map(str::to_string)),
        }?;

        let trimmed = candidate.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Ordered title candidates
pub const TITLE_SOURCES: &[TitleSource] = &[
    TitleSource::FirstElementText("h1"),
    TitleSource::MetaProperty("og:title"),
    TitleSource::FirstElementText("title"),
];

/// First non-empty title candidate, or [`UNTITLED`]
pub fn extract_title(tree: &DocumentTree) -> String {
    TITLE_SOURCES
        .iter()
        .find_map(|source| source.resolve(tree))
        .unwrap_or_else(|| {
            warn!("Could not find title");
            UNTITLED.to_string()
        })
}
