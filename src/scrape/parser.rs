// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Markup decoding and tree construction
//!
//! Each [`ParseMode`] has its own builder; all of them produce a
//! [`DocumentTree`].

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

use super::document::{DocumentTree, NodeId};
use super::parse_mode::ParseMode;
use super::types::ExtractError;

/// Elements that never have content in HTML
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// `<script>` and `<style>` elements including their raw bodies
static RAW_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});

/// Well-terminated character references
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[A-Za-z][A-Za-z0-9]*);").unwrap()
});

/// Decode a response body to UTF-8
///
/// Charset is taken from the declared content type, then from a
/// `<meta charset>` in the first 1024 bytes, defaulting to UTF-8.
pub fn decode_body(raw: &[u8], declared_content_type: Option<&str>) -> String {
    let encoding = declared_content_type
        .and_then(charset_param)
        .or_else(|| meta_charset(raw))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(raw);
    text.into_owned()
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
    })
}

fn meta_charset(raw: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&raw[..raw.len().min(1024)]).to_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let value: String = head[start..]
        .trim_start_matches(|c| c == '"' || c == '\'')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!value.is_empty()).then_some(value)
}

/// Build a document tree with the parser for `mode`
pub fn parse_document(markup: &str, mode: ParseMode) -> Result<DocumentTree, ExtractError> {
    match mode {
        ParseMode::Generic => Ok(parse_generic(markup)),
        ParseMode::StrictXml => parse_xml(markup),
        ParseMode::StrictHtmlOnly => parse_literal_html(markup),
    }
}

/// Permissive HTML parsing through html5ever
fn parse_generic(markup: &str) -> DocumentTree {
    let html = Html::parse_document(markup);
    let mut tree = DocumentTree::new();

    let root = html.root_element();
    let root_id = tree.append_element(tree.root(), root.value().name(), root.value().attrs());
    let mut pending: Vec<(ElementRef<'_>, NodeId)> = vec![(root, root_id)];

    // Children are attached when their parent is expanded so sibling order
    // between text and elements is kept
    while let Some((element, id)) = pending.pop() {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => tree.append_text(id, text),
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        let value = child_el.value();
                        let child_id = tree.append_element(id, value.name(), value.attrs());
                        pending.push((child_el, child_id));
                    }
                }
                _ => {}
            }
        }
    }

    tree
}

/// Well-formed XML parsing; any syntax error fails the parse
fn parse_xml(markup: &str) -> Result<DocumentTree, ExtractError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().check_end_names = true;

    let mut tree = DocumentTree::new();
    let root = tree.root();
    let mut open: Vec<NodeId> = vec![root];

    loop {
        let parent = open.last().copied().unwrap_or(root);
        match reader.read_event()? {
            Event::Start(e) => {
                let id = append_xml_element(&mut tree, parent, &e)?;
                open.push(id);
            }
            Event::Empty(e) => {
                append_xml_element(&mut tree, parent, &e)?;
            }
            Event::End(_) => {
                if open.len() > 1 {
                    open.pop();
                }
            }
            Event::Text(t) => {
                let text = t.unescape_with(resolve_html5_entity)?;
                tree.append_text(parent, &text);
            }
            Event::CData(c) => {
                tree.append_text(parent, &String::from_utf8_lossy(&c));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open.len() > 1 {
        return Err(ExtractError::Markup(
            "unexpected end of document inside an open element".to_string(),
        ));
    }
    Ok(tree)
}

fn append_xml_element(
    tree: &mut DocumentTree,
    parent: NodeId,
    e: &BytesStart<'_>,
) -> Result<NodeId, ExtractError> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value_with(resolve_html5_entity)?.into_owned();
        attrs.push((key, value));
    }
    Ok(tree.append_element(parent, &name, attrs))
}

/// Literal tag-nesting HTML parsing
///
/// Elements nest exactly as written. Void elements never open a scope, an
/// end tag closes the nearest open element of the same name and stray end
/// tags are dropped. Nothing is implied, so a page without `<body>` has none.
/// A `<` that cannot start a tag is text, and HTML5 character references
/// are decoded in text and attribute values.
fn parse_literal_html(markup: &str) -> Result<DocumentTree, ExtractError> {
    let stripped = RAW_TEXT_RE.replace_all(markup, "");
    let markup = escape_stray_lt(&stripped);
    let mut reader = Reader::from_str(&markup);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.check_comments = false;
    }

    let mut tree = DocumentTree::new();
    let root = tree.root();
    let mut open: Vec<(NodeId, String)> = vec![(root, String::new())];

    loop {
        let parent = open.last().map(|(id, _)| *id).unwrap_or(root);
        match reader.read_event()? {
            Event::Start(e) => {
                let (id, name) = append_html_element(&mut tree, parent, &e);
                if !VOID_ELEMENTS.contains(&name.as_str()) {
                    open.push((id, name));
                }
            }
            Event::Empty(e) => {
                append_html_element(&mut tree, parent, &e);
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
                if let Some(pos) = open.iter().rposition(|(_, open_name)| *open_name == name) {
                    if pos > 0 {
                        open.truncate(pos);
                    }
                }
            }
            Event::Text(t) => {
                let text = decode_html_entities(&String::from_utf8_lossy(&t));
                tree.append_text(parent, &text);
            }
            Event::CData(c) => {
                tree.append_text(parent, &String::from_utf8_lossy(&c));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tree)
}

fn append_html_element(
    tree: &mut DocumentTree,
    parent: NodeId,
    e: &BytesStart<'_>,
) -> (NodeId, String) {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_lowercase();
    let attrs: Vec<(String, String)> = e
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = decode_html_entities(&String::from_utf8_lossy(&attr.value));
            (key, value)
        })
        .collect();
    let id = tree.append_element(parent, &name, attrs);
    (id, name)
}

/// Escape every `<` not followed by a tag name, `/`, `!` or `?`
fn escape_stray_lt(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut chars = markup.chars().peekable();
    while let Some(c) = chars.next() {
        let opens_markup = chars
            .peek()
            .is_some_and(|&next| next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?'));
        if c == '<' && !opens_markup {
            out.push_str("&lt;");
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode HTML5 character references, leaving malformed ones as written
fn decode_html_entities(raw: &str) -> String {
    if let Ok(text) = unescape_with(raw, resolve_html5_entity) {
        return text.into_owned();
    }

    // Bare `&` or unknown names: decode what resolves, keep the rest
    ENTITY_RE
        .replace_all(raw, |caps: &regex::Captures<'_>| {
            let reference = &caps[1];
            let decoded = match reference.strip_prefix('#') {
                Some(num) => {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32).map(String::from)
                }
                None => resolve_html5_entity(reference).map(str::to_string),
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
