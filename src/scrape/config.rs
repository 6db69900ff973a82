// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for page scraping
//!
//! Defines settings for the HTTP listener, page fetching and parser selection.

use std::env;

/// Desktop Chrome identity sent with every fetch
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Hosts whose markup must be read with the literal HTML parser
pub const DEFAULT_STRICT_HTML_HOSTS: &[&str] = &["increment.com"];

/// Configuration for the scraper service
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Socket address the HTTP service binds to (default: 0.0.0.0:5000)
    pub listen_addr: String,
    /// Timeout for a single page fetch in seconds (default: 15)
    pub timeout_secs: u64,
    /// User-Agent header sent to origin servers
    pub user_agent: String,
    /// Maximum response body size in bytes (default: 10 MiB)
    pub max_body_bytes: usize,
    /// Hosts routed to the literal HTML parser
    pub strict_html_hosts: Vec<String>,
    /// Reject loopback, private and link-local hosts (default: true)
    pub block_private_hosts: bool,
    /// Directory for rotated log files; console only when unset
    pub log_dir: Option<String>,
}

impl ScraperConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            timeout_secs: env::var("SCRAPER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: env::var("SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
            max_body_bytes: env::var("SCRAPER_MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            strict_html_hosts: env::var("SCRAPER_STRICT_HTML_HOSTS")
                .map(|v| parse_host_list(&v))
                .unwrap_or(defaults.strict_html_hosts),
            block_private_hosts: env::var("SCRAPER_BLOCK_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.block_private_hosts),
            log_dir: env::var("LOG_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.max_body_bytes < 1024 {
            return Err("max_body_bytes must be at least 1024".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: 10 * 1024 * 1024,
            strict_html_hosts: DEFAULT_STRICT_HTML_HOSTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            block_private_hosts: true,
            log_dir: None,
        }
    }
}

/// Split a comma separated host list, dropping blanks
pub fn parse_host_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}
