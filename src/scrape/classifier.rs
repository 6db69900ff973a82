// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Element classification and duplicate suppression
//!
//! Walks the content region in document order and turns `p`, `pre`, `code`
//! and `div` elements into [`ContentBlock`]s.
//!
//! ## Rules
//!
//! - Elements under `nav`, `footer` or `sidebar` are skipped.
//! - `pre`, `code`, or any visited element classed `highlight` /
//!   `highlighter-rouge` is code.
//! - A code element below another visited code element is skipped; the
//!   enclosing block already carries its text. Highlighter wrappers
//!   (`div.highlight > pre > code`) therefore yield a single block.
//! - Language comes from a `language-X` / `highlight-X` class on the element,
//!   then its parent, then nested `pre`/`code` elements. Default `plain`.
//! - `p` that is not code becomes a text block.
//! - Blocks whose trimmed content is empty are dropped.

use super::document::{DocumentTree, NodeId};
use super::types::ContentBlock;

/// Tags visited during the walk
const VISITED_TAGS: &[&str] = &["p", "pre", "code", "div"];

/// Ancestors that mark page chrome
const EXCLUDED_ANCESTORS: &[&str] = &["nav", "footer", "sidebar"];

const CODE_TAGS: &[&str] = &["pre", "code"];

/// Classes added by syntax highlighters around code samples
const HIGHLIGHT_CLASSES: &[&str] = &["highlight", "highlighter-rouge"];

/// Class prefixes carrying the code language, in priority order
const LANGUAGE_PREFIXES: &[&str] = &["language-", "highlight-"];

pub const PLAIN_LANGUAGE: &str = "plain";

/// Classify every visited element below `content_root` into blocks
pub fn extract_blocks(tree: &DocumentTree, content_root: NodeId) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();

    for id in tree.descendants(content_root) {
        let Some(tag) = tree.tag(id) else {
            continue;
        };
        if !VISITED_TAGS.contains(&tag) {
            continue;
        }

        let chain = region_ancestors(tree, id, content_root);
        if chain
            .iter()
            .any(|&a| tree.tag(a).is_some_and(|t| EXCLUDED_ANCESTORS.contains(&t)))
        {
            continue;
        }

        if is_code_candidate(tree, id) {
            let nested = chain
                .iter()
                .filter(|&&a| a != content_root)
                .any(|&a| is_code_candidate(tree, a));
            if nested {
                continue;
            }

            let text = tree.text_content(id);
            let content = text.trim();
            if !content.is_empty() {
                blocks.push(ContentBlock::Code {
                    content: content.to_string(),
                    language: detect_language(tree, id),
                });
            }
        } else if tag == "p" {
            let text = tree.text_content(id);
            let content = text.trim();
            if !content.is_empty() {
                blocks.push(ContentBlock::Text {
                    content: content.to_string(),
                });
            }
        }
    }

    blocks
}

/// Ancestors of `id` up to and including `root`, nearest first
fn region_ancestors(tree: &DocumentTree, id: NodeId, root: NodeId) -> Vec<NodeId> {
    let mut chain = Vec::new();
    for ancestor in tree.ancestors(id) {
        chain.push(ancestor);
        if ancestor == root {
            break;
        }
    }
    chain
}

/// Visited element matching the code predicate
pub fn is_code_candidate(tree: &DocumentTree, id: NodeId) -> bool {
    let Some(tag) = tree.tag(id) else {
        return false;
    };
    VISITED_TAGS.contains(&tag)
        && (CODE_TAGS.contains(&tag)
            || HIGHLIGHT_CLASSES.iter().any(|class| tree.has_class(id, class)))
}

/// Language of a code element, `plain` when no class names one
pub fn detect_language(tree: &DocumentTree, id: NodeId) -> String {
    let own = tree.classes(id).iter();
    let parent = tree
        .parent(id)
        .map(|p| tree.classes(p))
        .unwrap_or(&[])
        .iter();
    let nested = tree
        .descendants(id)
        .filter(|&d| tree.tag(d).is_some_and(|t| CODE_TAGS.contains(&t)))
        .flat_map(|d| tree.classes(d).iter());

    own.chain(parent)
        .chain(nested)
        .find_map(|class| language_from_class(class))
        .unwrap_or(PLAIN_LANGUAGE)
        .to_string()
}

fn language_from_class(class: &str) -> Option<&str> {
    LANGUAGE_PREFIXES
        .iter()
        .find_map(|prefix| class.strip_prefix(prefix))
        .filter(|lang| !lang.is_empty())
}
