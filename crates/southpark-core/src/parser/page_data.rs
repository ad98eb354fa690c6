//! Embedded page data extraction
//!
//! Season pages are server rendered with their state assigned to
//! `window.__DATA__`. This module cuts that literal out of the markup and
//! parses it, optionally attaching season links scraped from raw anchors.

use std::borrow::Cow;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{CatalogError, Result};

/// Marker the page state is assigned to
pub const DATA_MARKER: &str = "window.__DATA__";

/// Key under which anchor-derived season links are attached
pub const LINKS_FOUND_KEY: &str = "links_found";

/// Pattern of season/episode links in raw markup
const SEASON_LINK_PATTERN: &str = r"^/seasons/south-park/\w+/\w+-\d+";

/// Extracts the embedded page data from raw markup
///
/// Returns `Ok(None)` when the marker is absent. When `html_links` is set,
/// anchors pointing at season pages are collected in document order and
/// stored under [`LINKS_FOUND_KEY`], prefixed with a `null` placeholder so
/// index 0 stands for the page itself.
///
/// # Errors
/// - `ParseError` if the marker is present but no `};` terminator follows
/// - `JsonError` if the literal is not valid JSON
///
/// # Example
/// ```
/// use southpark_core::parser::extract_page_data;
/// let data = extract_page_data(r#"<script>window.__DATA__ = {"a":1};</script>"#, false).unwrap();
/// assert_eq!(data, Some(serde_json::json!({"a": 1})));
/// ```
pub fn extract_page_data(markup: &str, html_links: bool) -> Result<Option<Value>> {
    let Some(start) = markup.find(DATA_MARKER) else {
        return Ok(None);
    };
    let tail = &markup[start..];

    let end = tail.find("};").ok_or_else(|| {
        CatalogError::ParseError(format!("no `}};` after {}", DATA_MARKER))
    })?;
    let equals = tail[..end]
        .find('=')
        .ok_or_else(|| CatalogError::ParseError(format!("no `=` after {}", DATA_MARKER)))?;

    // keep the closing brace, drop the semicolon
    let literal = tail[equals + 1..end + 1].trim();
    let mut data: Value = serde_json::from_str(&escape_control_characters(literal))?;

    if html_links {
        let mut links = vec![Value::Null];
        links.extend(find_season_links(markup).into_iter().map(Value::String));
        if let Value::Object(map) = &mut data {
            map.insert(LINKS_FOUND_KEY.to_string(), Value::Array(links));
        }
    }

    Ok(Some(data))
}

/// Collects season page links from anchors, in document order
///
/// Only the `/seasons/south-park/<show>/<season>-<n>` prefix of each
/// matching href is kept.
pub fn find_season_links(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    let (Ok(selector), Ok(pattern)) = (Selector::parse("a[href]"), Regex::new(SEASON_LINK_PATTERN))
    else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| pattern.find(href).map(|m| m.as_str().to_string()))
        .collect()
}

/// Escapes raw control characters inside JSON string literals
///
/// Server-rendered data sometimes carries literal tabs and newlines inside
/// strings, which strict JSON rejects.
fn escape_control_characters(literal: &str) -> Cow<'_, str> {
    if !literal.chars().any(|c| c.is_control()) {
        return Cow::Borrowed(literal);
    }

    let mut out = String::with_capacity(literal.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for c in literal.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            } else if (c as u32) < 0x20 {
                match c {
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    other => out.push_str(&format!("\\u{:04x}", other as u32)),
                }
                continue;
            }
        } else if c == '"' {
            in_string = true;
        }
        out.push(c);
    }

    Cow::Owned(out)
}
