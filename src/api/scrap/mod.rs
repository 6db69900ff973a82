// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page scraping API endpoint
//!
//! Provides the `/scrap` HTTP endpoint.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::scrap_handler;
pub use request::ScrapRequest;
pub use response::ScrapResponse;
