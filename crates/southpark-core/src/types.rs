//! Core data types for the catalog scraper
//!
//! These are the shapes persisted in `addon-data-<region>.json`.

use serde::{Deserialize, Serialize};

/// One episode as consumed by the addon
///
/// Season and episode numbers are 1-based decimal strings. `mediagen`
/// holds base64-encoded manifest URLs (see [`crate::mediagen::decode_manifest`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Thumbnail image URL
    pub image: String,

    /// Site-wide unique episode id
    pub uuid: String,

    /// Episode synopsis
    pub details: String,

    /// Air date as shown by the site
    pub date: String,

    /// Episode title
    pub title: String,

    /// Episode page path on the regional site
    pub url: String,

    /// 1-based season number
    pub season: String,

    /// 1-based episode number within the season
    pub episode: String,

    /// Encoded manifest references
    pub mediagen: Vec<String>,
}

/// Ordered episodes of one season
pub type SeasonCatalog = Vec<EpisodeRecord>;

/// Top-level persisted artifact
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Local creation time, `YYYY-MM-DD HH:MM:SS.ffffff`
    pub created: String,

    /// Seasons in site order
    pub seasons: Vec<SeasonCatalog>,
}

impl Catalog {
    /// Create a catalog stamped with the current local time
    pub fn new(seasons: Vec<SeasonCatalog>) -> Self {
        Self {
            created: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S%.6f")
                .to_string(),
            seasons,
        }
    }

    /// Replace the final season of `self` with the first season of `latest`
    ///
    /// Used when only the newest season was scraped. If `self` has no
    /// seasons yet the fresh one is appended; if `latest` is empty the
    /// previous seasons are kept untouched. The timestamp always comes
    /// from `latest`.
    pub fn merge_latest(mut self, latest: Catalog) -> Catalog {
        if let Some(season) = latest.seasons.into_iter().next() {
            match self.seasons.last_mut() {
                Some(last) => *last = season,
                None => self.seasons.push(season),
            }
        }
        self.created = latest.created;
        self
    }
}
