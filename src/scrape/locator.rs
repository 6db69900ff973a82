// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content region location
//!
//! Finds the subtree holding the primary article body. Candidates are tried
//! in order and the first element found wins:
//! 1. `<article>`
//! 2. `<main>`
//! 3. any element with class `content`
//! 4. `<body>`

use tracing::{debug, warn};

use super::document::{DocumentTree, NodeId};
use super::types::ExtractError;

/// One candidate of the region fallback chain
#[derive(Debug, Clone, Copy)]
pub enum RegionRule {
    Tag(&'static str),
    Class(&'static str),
}

impl RegionRule {
    fn find(&self, tree: &DocumentTree) -> Option<NodeId> {
        match self {
            Self::Tag(tag) => tree.find_first_tag(tag),
            Self::Class(class) => tree.find_first(|t, id| t.has_class(id, class)),
        }
    }
}

/// Ordered candidates for the primary content region
pub const CONTENT_REGION_RULES: &[RegionRule] = &[
    RegionRule::Tag("article"),
    RegionRule::Tag("main"),
    RegionRule::Class("content"),
];

/// Locate the primary content element, falling back to `<body>`
pub fn locate_content_root(tree: &DocumentTree) -> Result<NodeId, ExtractError> {
    for rule in CONTENT_REGION_RULES {
        if let Some(id) = rule.find(tree) {
            debug!("Content region matched {:?}", rule);
            return Ok(id);
        }
    }

    warn!("Could not find main content container, using body");
    tree.find_first_tag("body").ok_or(ExtractError::MissingBody)
}
