//! Episode record normalization
//!
//! Turns one raw episode node of the page data into an [`EpisodeRecord`].

use serde_json::Value;

use crate::mediagen::encode_manifest;
use crate::path;
use crate::path::dig_str;
use crate::types::EpisodeRecord;

/// Title of an episode node (`meta.subHeader`), if present and non-null
pub fn episode_title(node: &Value) -> Option<&Value> {
    path::dig(node, &path!["meta", "subHeader"]).filter(|v| !v.is_null())
}

/// Builds an episode record from a raw node
///
/// `season` and `episode` are 0-based and stored 1-based. Missing fields
/// become empty strings. Empty manifest URLs are dropped, the rest are
/// encoded in order.
///
/// # Arguments
/// * `node` - Raw episode node from page data or a continuation response
/// * `season` - 0-based season index
/// * `episode` - 0-based episode index within the season
/// * `manifests` - Plain manifest URLs resolved for this episode
pub fn build_episode(
    node: &Value,
    season: usize,
    episode: usize,
    manifests: Vec<String>,
) -> EpisodeRecord {
    EpisodeRecord {
        image: dig_str(node, &path!["media", "image", "url"]),
        uuid: dig_str(node, &path!["id"]),
        details: dig_str(node, &path!["meta", "description"]),
        date: dig_str(node, &path!["meta", "date"]),
        title: dig_str(node, &path!["meta", "subHeader"]),
        url: dig_str(node, &path!["url"]),
        season: (season + 1).to_string(),
        episode: (episode + 1).to_string(),
        mediagen: manifests
            .iter()
            .filter(|url| !url.is_empty())
            .map(|url| encode_manifest(url))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediagen::decode_manifest;
    use serde_json::json;

    fn node() -> Value {
        json!({
            "id": "a1b2c3",
            "url": "/episodes/a1b2c3/south-park-cartman-gets-an-anal-probe",
            "media": {"image": {"url": "https://images.example/a1b2c3.jpg"}},
            "meta": {
                "subHeader": "Cartman Gets an Anal Probe",
                "description": "Cartman is abducted by aliens.",
                "date": "08/13/1997"
            }
        })
    }

    #[test]
    fn test_build_episode_fields() {
        let ep = build_episode(&node(), 0, 4, Vec::new());
        assert_eq!(ep.uuid, "a1b2c3");
        assert_eq!(ep.image, "https://images.example/a1b2c3.jpg");
        assert_eq!(ep.title, "Cartman Gets an Anal Probe");
        assert_eq!(ep.details, "Cartman is abducted by aliens.");
        assert_eq!(ep.date, "08/13/1997");
        assert_eq!(ep.url, "/episodes/a1b2c3/south-park-cartman-gets-an-anal-probe");
        assert_eq!(ep.season, "1");
        assert_eq!(ep.episode, "5");
        assert!(ep.mediagen.is_empty());
    }

    #[test]
    fn test_build_episode_missing_fields_default_empty() {
        let ep = build_episode(&json!({"id": 42}), 2, 0, Vec::new());
        assert_eq!(ep.uuid, "42");
        assert_eq!(ep.title, "");
        assert_eq!(ep.image, "");
        assert_eq!(ep.url, "");
        assert_eq!(ep.season, "3");
        assert_eq!(ep.episode, "1");
    }

    #[test]
    fn test_build_episode_encodes_manifests_in_order() {
        let manifests = vec![
            "https://m.example/1".to_string(),
            String::new(),
            "https://m.example/2".to_string(),
        ];
        let ep = build_episode(&node(), 0, 0, manifests);
        assert_eq!(ep.mediagen.len(), 2);
        assert_eq!(
            decode_manifest(&ep.mediagen[0]).as_deref(),
            Some("https://m.example/1")
        );
        assert_eq!(
            decode_manifest(&ep.mediagen[1]).as_deref(),
            Some("https://m.example/2")
        );
    }

    #[test]
    fn test_episode_title() {
        assert_eq!(episode_title(&node()), Some(&json!("Cartman Gets an Anal Probe")));
        assert_eq!(episode_title(&json!({"meta": {}})), None);
        assert_eq!(episode_title(&json!({"meta": {"subHeader": null}})), None);
    }
}
