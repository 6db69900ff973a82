// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page scraping module
//!
//! Turns a page URL into a title plus ordered prose and code blocks.
//!
//! ## Architecture
//!
//! ```text
//! URL → PageFetcher → FetchResult → ParserSelector → DocumentTree
//!                                                        ↓
//!        ExtractionResult ← classifier ← content region locator
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = ScraperConfig::from_env();
//! let fetcher = PageFetcher::new(&config)?;
//! let selector = ParserSelector::with_strict_html_hosts(config.strict_html_hosts);
//! let extractor = Extractor::new(selector);
//!
//! let page = fetcher.fetch("https://example.com/post").await?;
//! let result = extractor.extract(&page)?;
//! ```

pub mod classifier;
pub mod config;
pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod locator;
pub mod parse_mode;
pub mod parser;
pub mod title;
pub mod types;

pub use config::ScraperConfig;
pub use document::{DocumentTree, NodeId};
pub use extractor::{extract_from_markup, Extractor};
pub use fetcher::{FetchError, PageFetcher};
pub use parse_mode::{select_mode, ModeRule, ParseMode, ParserSelector};
pub use types::{ContentBlock, ExtractError, ExtractionResult, FetchResult, UNTITLED};
