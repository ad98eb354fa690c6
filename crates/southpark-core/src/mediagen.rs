//! Media manifest references
//!
//! The manifest service answers with a feed of content groups. Each group's
//! `content` URL is rewritten to request an HLS JSON descriptor, then stored
//! base64-encoded so the catalog stays opaque to casual edits.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::path;
use crate::path::{dig_array, dig_str};

/// Placeholder the service leaves in content URLs
const DEVICE_PLACEHOLDER: &str = "&device={device}";

/// Query appended to every content URL
const MANIFEST_FORMAT: &str = "&format=json&acceptMethods=hls";

/// Pulls rewritten manifest URLs out of a manifest feed
///
/// Items without a `group.content` URL are skipped. A feed without
/// `feed.items` yields an empty list.
pub fn extract_manifest_urls(feed: &Value) -> Vec<String> {
    dig_array(feed, &path!["feed", "items"])
        .iter()
        .map(|item| dig_str(item, &path!["group", "content"]))
        .filter(|content| !content.is_empty())
        .map(|content| format!("{}{}", content.replace(DEVICE_PLACEHOLDER, ""), MANIFEST_FORMAT))
        .collect()
}

/// Encodes a manifest URL for storage
pub fn encode_manifest(url: &str) -> String {
    STANDARD.encode(url.as_bytes())
}

/// Decodes a stored manifest reference back into its URL
///
/// Returns `None` if the reference is not valid base64 or not UTF-8.
pub fn decode_manifest(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}
