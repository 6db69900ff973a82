// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Block classification over whole documents

use content_scraper::{extract_from_markup, ContentBlock, ExtractError, ParseMode};

fn extract(html: &str) -> Result<Vec<ContentBlock>, ExtractError> {
    extract_from_markup(html, ParseMode::Generic).map(|r| r.blocks)
}

#[test]
fn test_paragraph_only_document() {
    let html = r#"<html><body><article>
        <p>One</p>
        <p>  </p>
        <section><p>Two <b>bold</b></p></section>
        <p>Three</p>
    </article></body></html>"#;

    let blocks = extract(html).unwrap();

    let contents: Vec<&str> = blocks.iter().map(|b| b.content()).collect();
    assert_eq!(contents, vec!["One", "Two bold", "Three"]);
    assert!(blocks.iter().all(|b| !b.is_code()));
}

#[test]
fn test_highlight_wrapped_code_emits_once() {
    let html = r#"<html><body><main>
        <div class="highlight"><pre><code class="language-python">def f():
    return 1</code></pre></div>
    </main></body></html>"#;

    let blocks = extract(html).unwrap();

    assert_eq!(
        blocks,
        vec![ContentBlock::Code {
            content: "def f():\n    return 1".to_string(),
            language: "python".to_string(),
        }]
    );
}

#[test]
fn test_footer_code_never_emitted() {
    let html = r#"<html><body>
        <p>Real content</p>
        <footer><div><div><pre>copyright()</pre></div></div></footer>
    </body></html>"#;

    let blocks = extract(html).unwrap();

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content(), "Real content");
}

#[test]
fn test_zero_qualifying_elements_fails() {
    let html = "<html><body><h1>Title</h1><ul><li>item</li></ul></body></html>";
    assert!(matches!(extract(html), Err(ExtractError::NoContent)));
}

#[test]
fn test_content_class_region() {
    let html = r#"<html><body>
        <p>Outside</p>
        <div class="post content"><p>Inside</p></div>
    </body></html>"#;

    let blocks = extract(html).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content(), "Inside");
}

#[test]
fn test_scripts_do_not_leak_into_text() {
    let html = r#"<html><body><p>Visible<script>var hidden = 1;</script></p></body></html>"#;
    let blocks = extract(html).unwrap();
    assert_eq!(blocks[0].content(), "Visible");
}
