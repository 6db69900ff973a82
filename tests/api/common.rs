// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared helpers: a throw-away origin server and an app wired to reach it

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use content_scraper::{
    api::http_server::{create_app, AppState},
    ScraperConfig,
};
use std::net::SocketAddr;
use tower::util::ServiceExt;

pub const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Fallback Title</title></head>
<body>
  <nav><p>Home</p><p>About</p></nav>
  <article>
    <h1>Writing Tests</h1>
    <p>Tests keep code honest.</p>
    <div class="highlight"><pre><code class="language-python">assert add(1, 2) == 3</code></pre>
    </div>
    <p>That is all.</p>
  </article>
  <footer><pre>© footer</pre></footer>
</body>
</html>"#;

pub const BODY_ONLY_HTML: &str = r#"<html><body>
  <p>First paragraph.</p>
  <p>Second paragraph.</p>
</body></html>"#;

pub const EMPTY_HTML: &str = r#"<html><head><title>Empty</title></head>
<body><h2>Nothing to see</h2><footer><p>Footer only</p></footer></body></html>"#;

pub const XHTML_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>Feed</title></head>
<body><main><p>From XML</p></main></body>
</html>"#;

async fn html(body: &'static str) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], body)
}

/// Start an origin server serving the fixtures, returning its address
pub async fn spawn_origin() -> SocketAddr {
    let origin = Router::new()
        .route("/article", get(|| html(ARTICLE_HTML)))
        .route("/body-only", get(|| html(BODY_ONLY_HTML)))
        .route("/moved", get(|| async { Redirect::temporary("/article") }))
        .route("/empty", get(|| html(EMPTY_HTML)))
        .route(
            "/feed.xml",
            get(|| async { ([(header::CONTENT_TYPE, "application/xml")], XHTML_DOC) }),
        )
        .route(
            "/broken.xml",
            get(|| async { ([(header::CONTENT_TYPE, "application/xml")], "<html><body><p>open") }),
        )
        .route(
            "/large",
            get(|| async {
                let paragraphs = "<p>padding paragraph</p>".repeat(200);
                (
                    [(header::CONTENT_TYPE, "text/html")],
                    format!("<html><body>{}</body></html>", paragraphs),
                )
            }),
        )
        .route(
            "/latin1",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=iso-8859-1")],
                    b"<html><body><p>caf\xe9</p></body></html>".to_vec(),
                )
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, origin).await.unwrap();
    });
    addr
}

/// Address nothing listens on
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn test_config() -> ScraperConfig {
    ScraperConfig {
        timeout_secs: 5,
        block_private_hosts: false,
        ..ScraperConfig::default()
    }
}

pub fn test_app(config: &ScraperConfig) -> Router {
    create_app(AppState::new(config).unwrap())
}

/// POST a raw body to /scrap, returning status and parsed JSON
pub async fn post_scrap(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/scrap")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn scrap_source(app: Router, source: &str) -> (StatusCode, serde_json::Value) {
    post_scrap(app, &serde_json::json!({ "source": source }).to_string()).await
}
