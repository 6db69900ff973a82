// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scrape::{ExtractError, FetchError};

/// Body of every non-200 response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Missing or malformed request input
    Validation(String),
    /// Page was reachable but yielded no blocks
    NoContent,
    /// Fetch failed (DNS, connect, timeout, non-2xx)
    Transport(String),
    /// Anything else
    Internal(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NoContent => "No content found on the page".to_string(),
            ApiError::Transport(msg) => format!("Failed to fetch URL: {}", msg),
            ApiError::Internal(msg) => msg.clone(),
        };
        ErrorResponse { error }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NoContent => StatusCode::BAD_REQUEST,
            ApiError::Transport(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ApiError::NoContent => write!(f, "No content found"),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        if e.is_validation() {
            ApiError::Validation(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::NoContent => ApiError::NoContent,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
