// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Parser strategy selection
//!
//! Picks a markup parser from the declared content type and the origin host.
//! Rules are evaluated in order and the first match wins.

use std::fmt;
use url::Url;

use super::config::DEFAULT_STRICT_HTML_HOSTS;

/// Markup-interpretation strategy applied before tree construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Permissive html5ever parsing
    Generic,
    /// Well-formed XML only
    StrictXml,
    /// Literal tag nesting, no implied elements
    StrictHtmlOnly,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::StrictXml => write!(f, "strict-xml"),
            Self::StrictHtmlOnly => write!(f, "strict-html"),
        }
    }
}

/// One entry of the selection chain
#[derive(Debug, Clone)]
pub enum ModeRule {
    /// Content type contains the needle (case-insensitive)
    ContentTypeContains { needle: String, mode: ParseMode },
    /// URL host equals one of the listed hosts (case-insensitive)
    HostIn { hosts: Vec<String>, mode: ParseMode },
}

impl ModeRule {
    fn matches(&self, content_type: Option<&str>, host: Option<&str>) -> Option<ParseMode> {
        match self {
            Self::ContentTypeContains { needle, mode } => content_type
                .filter(|ct| ct.to_lowercase().contains(&needle.to_lowercase()))
                .map(|_| *mode),
            Self::HostIn { hosts, mode } => host
                .filter(|h| hosts.iter().any(|candidate| candidate.eq_ignore_ascii_case(h)))
                .map(|_| *mode),
        }
    }
}

/// Ordered rule chain falling back to [`ParseMode::Generic`]
#[derive(Debug, Clone)]
pub struct ParserSelector {
    rules: Vec<ModeRule>,
}

impl ParserSelector {
    /// Default chain with a custom strict-HTML host list
    pub fn with_strict_html_hosts(hosts: Vec<String>) -> Self {
        Self {
            rules: vec![
                ModeRule::ContentTypeContains {
                    needle: "xml".to_string(),
                    mode: ParseMode::StrictXml,
                },
                ModeRule::HostIn {
                    hosts,
                    mode: ParseMode::StrictHtmlOnly,
                },
            ],
        }
    }

    pub fn from_rules(rules: Vec<ModeRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ModeRule] {
        &self.rules
    }

    pub fn select(&self, declared_content_type: Option<&str>, source_url: &str) -> ParseMode {
        let host = Url::parse(source_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()));

        self.rules
            .iter()
            .find_map(|rule| rule.matches(declared_content_type, host.as_deref()))
            .unwrap_or(ParseMode::Generic)
    }
}

impl Default for ParserSelector {
    fn default() -> Self {
        Self::with_strict_html_hosts(
            DEFAULT_STRICT_HTML_HOSTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
        )
    }
}

/// Select a parse mode using the default rule chain
pub fn select_mode(declared_content_type: Option<&str>, source_url: &str) -> ParseMode {
    ParserSelector::default().select(declared_content_type, source_url)
}
