// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching with timeouts
//!
//! Issues a single GET per page with a desktop-browser identity. No retries:
//! a failed fetch fails the request.

use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::{Host, Url};

use super::config::ScraperConfig;
use super::types::FetchResult;

const MAX_REDIRECTS: usize = 10;

/// Page fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// URL does not parse or is not http(s)
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),

    /// URL points at localhost or a private network
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),

    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),

    /// Connection, DNS or protocol failure
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),

    /// Redirect chain longer than the limit
    #[error("Too many redirects fetching: {0}")]
    TooManyRedirects(String),

    /// Body exceeded the configured size cap
    #[error("Response body larger than {limit} bytes for: {url}")]
    BodyTooLarge { limit: usize, url: String },
}

impl FetchError {
    /// Whether the caller supplied a bad URL, as opposed to a transport fault
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::UnsafeUrl(_))
    }

    fn from_reqwest(e: reqwest::Error, url: &str) -> Self {
        // Redirect policy failures carry our own error as the source
        if let Some(inner) =
            std::error::Error::source(&e).and_then(|source| source.downcast_ref::<FetchError>())
        {
            return inner.clone();
        }
        if e.is_timeout() {
            Self::Timeout(url.to_string())
        } else {
            Self::HttpError(e.to_string())
        }
    }
}

/// Page fetcher sharing one HTTP client across requests
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    max_body_bytes: usize,
    block_private_hosts: bool,
}

impl PageFetcher {
    /// Create a new page fetcher
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(redirect_policy(config.block_private_hosts))
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
            block_private_hosts: config.block_private_hosts,
        })
    }

    /// Fetch the raw body and declared content type of a single URL
    pub async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let parsed = self.validate_url(url)?;

        debug!("Fetching page: {}", url);

        let mut response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let declared_content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut raw_body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url))?
        {
            if raw_body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge {
                    limit: self.max_body_bytes,
                    url: url.to_string(),
                });
            }
            raw_body.extend_from_slice(&chunk);
        }

        info!(
            "Fetched {} bytes from: {} ({})",
            raw_body.len(),
            url,
            declared_content_type.as_deref().unwrap_or("no content type")
        );

        Ok(FetchResult {
            raw_body,
            declared_content_type,
            source_url: url.to_string(),
        })
    }

    /// Parse `url` and apply the host policy
    pub fn validate_url(&self, url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        if !["http", "https"].contains(&parsed.scheme()) || parsed.host().is_none() {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        if self.block_private_hosts && !is_public_host(&parsed) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        Ok(parsed)
    }
}

/// Redirect policy applying the hop limit and host policy to every hop
fn redirect_policy(block_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        match check_redirect(attempt.url(), attempt.previous().len(), block_private_hosts) {
            Ok(()) => attempt.follow(),
            Err(e) => attempt.error(e),
        }
    })
}

/// Validate the next hop of a redirect chain after `previous` requests
pub fn check_redirect(
    next: &Url,
    previous: usize,
    block_private_hosts: bool,
) -> Result<(), FetchError> {
    if previous > MAX_REDIRECTS {
        return Err(FetchError::TooManyRedirects(next.to_string()));
    }
    if block_private_hosts && !is_public_host(next) {
        return Err(FetchError::UnsafeUrl(next.to_string()));
    }
    Ok(())
}

/// Check that the URL host is not localhost, loopback, private or link-local
pub fn is_public_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_lowercase();
            domain != "localhost" && !domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_public_ipv6(ip),
        None => false,
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast())
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_public_ipv4(v4);
    }
    let first = ip.segments()[0];
    // fc00::/7 unique local, fe80::/10 link-local
    !(ip.is_loopback()
        || ip.is_unspecified()
        || (first & 0xfe00) == 0xfc00
        || (first & 0xffc0) == 0xfe80)
}
