// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /scrap endpoint tests
//!
//! Every request is served by a local origin on 127.0.0.1, so private-host
//! blocking is off except where a test checks it.

use super::common::*;
use axum::http::StatusCode;
use content_scraper::ScraperConfig;
use serde_json::{json, Value};

fn blocks(body: &Value) -> Value {
    let content = body["content"].as_str().expect("content must be a string");
    serde_json::from_str(content).unwrap()
}

#[tokio::test]
async fn test_scrap_article_success() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/article", origin)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Writing Tests");
    assert_eq!(
        blocks(&body),
        json!([
            {"type": "text", "content": "Tests keep code honest."},
            {"type": "code", "content": "assert add(1, 2) == 3", "language": "python"},
            {"type": "text", "content": "That is all."}
        ])
    );
}

#[tokio::test]
async fn test_scrap_content_is_pretty_json_string() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (_, body) = scrap_source(app, &format!("http://{}/body-only", origin)).await;

    let content = body["content"].as_str().unwrap();
    assert!(content.starts_with("[\n  {\n    \"type\": \"text\""));
}

#[tokio::test]
async fn test_scrap_follows_redirects() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/moved", origin)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Writing Tests");
}

#[tokio::test]
async fn test_scrap_body_fallback() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/body-only", origin)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Untitled Content");
    assert_eq!(blocks(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_scrap_xml_content_type() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/feed.xml", origin)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Feed");
    assert_eq!(blocks(&body), json!([{"type": "text", "content": "From XML"}]));
}

#[tokio::test]
async fn test_scrap_malformed_xml_is_internal_error() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/broken.xml", origin)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_scrap_declared_charset() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/latin1", origin)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(blocks(&body)[0]["content"], "café");
}

#[tokio::test]
async fn test_scrap_no_content_is_bad_request() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/empty", origin)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No content found on the page"}));
}

#[tokio::test]
async fn test_scrap_missing_source() {
    let app = test_app(&test_config());

    let (status, body) = post_scrap(app, "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No source URL provided"}));
}

#[tokio::test]
async fn test_scrap_empty_source() {
    let app = test_app(&test_config());

    let (status, body) = post_scrap(app, r#"{"source": ""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No source URL provided");
}

#[tokio::test]
async fn test_scrap_malformed_json() {
    let app = test_app(&test_config());

    let (status, body) = post_scrap(app, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_scrap_invalid_url_is_bad_request() {
    let app = test_app(&test_config());

    let (status, _) = scrap_source(app, "ftp://example.com/file").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scrap_private_host_blocked() {
    let origin = spawn_origin().await;
    let config = ScraperConfig {
        block_private_hosts: true,
        ..test_config()
    };
    let app = test_app(&config);

    let (status, body) = scrap_source(app, &format!("http://{}/article", origin)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Unsafe URL"));
}

#[tokio::test]
async fn test_scrap_upstream_404_is_transport_error() {
    let origin = spawn_origin().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/missing", origin)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to fetch URL:"));
    assert!(error.contains("404"));
}

#[tokio::test]
async fn test_scrap_connection_refused_is_transport_error() {
    let addr = closed_addr().await;
    let app = test_app(&test_config());

    let (status, body) = scrap_source(app, &format!("http://{}/", addr)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Failed to fetch URL:"));
}

#[tokio::test]
async fn test_scrap_body_size_cap() {
    let origin = spawn_origin().await;
    let config = ScraperConfig {
        max_body_bytes: 1024,
        ..test_config()
    };

    let (status, _) = scrap_source(test_app(&config), &format!("http://{}/article", origin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = scrap_source(test_app(&config), &format!("http://{}/large", origin)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("larger than 1024 bytes"));
}
