//! Season page layout resolution
//!
//! Finds the episode nodes and the "load more" continuation of a season
//! page. Fetching and numbering is done by the scraper, which drives these
//! pure helpers.

use serde_json::Value;
use tracing::debug;

use crate::parser::episode::episode_title;
use crate::parser::page_data::LINKS_FOUND_KEY;
use crate::path;
use crate::path::{dig, dig_array, dig_str};
use crate::region::Layout;

/// Where a season's remaining episodes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Everything is on the page
    None,
    /// Site-relative URL of the next batch
    Url(String),
    /// More episodes are advertised but no URL was given
    Unresolvable,
}

/// Episode nodes and pagination found on a season page
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonLayout<'a> {
    /// Raw episode nodes in page order, not yet de-duplicated
    pub episodes: Vec<&'a Value>,
    /// Pagination source for the rest of the season
    pub continuation: Continuation,
}

impl SeasonLayout<'_> {
    fn empty() -> Self {
        Self {
            episodes: Vec::new(),
            continuation: Continuation::None,
        }
    }
}

/// Resolves the episode list of a season page for the given layout
///
/// Unrecognized pages resolve to an empty layout.
pub fn resolve_layout(data: &Value, layout: Layout) -> SeasonLayout<'_> {
    let components = dig_array(data, &path!["children", "type|MainContainer", "children"]);
    let line_lists: Vec<&Value> = components
        .iter()
        .filter(|c| c.get("type").and_then(Value::as_str) == Some("LineList"))
        .collect();

    match layout {
        Layout::LineList => resolve_line_list(&line_lists),
        Layout::VideoGuide => resolve_video_guide(&line_lists),
    }
}

fn resolve_line_list<'a>(line_lists: &[&'a Value]) -> SeasonLayout<'a> {
    let continuation = line_lists
        .iter()
        .filter_map(|list| list.get("props"))
        .find(|props| has_load_more(props))
        .map(|props| {
            let url = dig_str(props, &path!["loadMore", "url"]);
            if url.is_empty() {
                Continuation::Unresolvable
            } else {
                Continuation::Url(url)
            }
        })
        .unwrap_or(Continuation::None);

    let items = line_lists
        .iter()
        .copied()
        .map(|list| dig_array(list, &path!["props", "items"]))
        .find(|items| items.first().is_some_and(|first| first.get("url").is_some()));

    let Some(items) = items else {
        debug!("no episode list found on season page");
        return SeasonLayout::empty();
    };

    SeasonLayout {
        episodes: items.iter().collect(),
        continuation,
    }
}

fn resolve_video_guide<'a>(line_lists: &[&'a Value]) -> SeasonLayout<'a> {
    let guide = line_lists
        .iter()
        .copied()
        .find(|list| dig_str(list, &path!["props", "type"]) == "video-guide");

    let Some(guide) = guide else {
        debug!("no video guide found on season page");
        return SeasonLayout::empty();
    };

    let items = dig_array(guide, &path!["props", "items"]);
    // a guide whose first item has no title lists something other than episodes
    if items.first().is_some_and(|first| episode_title(first).is_none()) {
        return SeasonLayout::empty();
    }

    let load_more = dig_str(guide, &path!["props", "loadMore", "url"]);
    let continuation = if load_more.is_empty() {
        Continuation::None
    } else {
        Continuation::Url(load_more)
    };

    SeasonLayout {
        episodes: items.iter().collect(),
        continuation,
    }
}

fn has_load_more(props: &Value) -> bool {
    props.get("loadMore").is_some_and(|v| !v.is_null())
        && props.get("type").and_then(Value::as_str) == Some("video-guide")
}

/// Drops repeated episodes, keeping the first node for each title
///
/// Nodes without a title share a single "no title" key.
pub fn unique_episodes<'a>(nodes: &[&'a Value]) -> Vec<&'a Value> {
    let mut seen: Vec<Option<&Value>> = Vec::new();
    let mut unique = Vec::new();

    for node in nodes {
        let title = episode_title(node);
        if seen.contains(&title) {
            continue;
        }
        seen.push(title);
        unique.push(*node);
    }

    unique
}

/// Lists the season page paths of an index page, in site order
///
/// Links scraped from anchors win over the season selector. A `None`
/// entry means "the page already loaded", which is how the placeholder in
/// front of anchor links is expressed.
pub fn season_urls(data: &Value) -> Vec<Option<String>> {
    let to_url = |value: Option<&Value>| value.and_then(Value::as_str).map(str::to_string);

    if let Some(Value::Array(links)) = data.get(LINKS_FOUND_KEY) {
        debug!("using links");
        return links.iter().map(|link| to_url(Some(link))).collect();
    }

    dig_array(
        data,
        &path![
            "children",
            "type|MainContainer",
            "children",
            "type|SeasonSelector",
            "props",
            "items"
        ],
    )
    .iter()
    .map(|item| to_url(dig(item, &path!["url"])))
    .collect()
}

/// 0-based episode number of the `index`-th of `count` nodes
///
/// With `inverted` set the last node gets number 0.
pub fn episode_number(index: usize, count: usize, inverted: bool) -> usize {
    if inverted { count - index - 1 } else { index }
}
