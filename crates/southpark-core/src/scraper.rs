//! Main scraper API
//!
//! Combines the HTTP client with the page parsers to walk a region's
//! seasons and assemble its [`Catalog`].

use std::path::PathBuf;

use serde_json::Value;
use tracing::{Level, debug, info, warn};

use crate::client::{ClientConfig, SiteClient};
use crate::error::{CatalogError, Result};
use crate::mediagen::extract_manifest_urls;
use crate::parser::season::episode_number;
use crate::parser::{
    Continuation, build_episode, extract_page_data, resolve_layout, season_urls, unique_episodes,
};
use crate::path;
use crate::path::dig_str;
use crate::region::{Region, RegionProfile};
use crate::types::{Catalog, EpisodeRecord, SeasonCatalog};
use crate::url::{MANIFEST_SERVICE, build_continuation_url, build_manifest_url, build_page_url};

/// Run-wide scraper settings, built once at startup
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// Manifest service endpoint
    pub manifest_service: String,
    /// When set, raw pages and parsed data are dumped here
    pub debug_dir: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            manifest_service: MANIFEST_SERVICE.to_string(),
            debug_dir: None,
        }
    }
}

/// Scrapes one regional site into a catalog
///
/// # Example
/// ```no_run
/// # async fn example() -> southpark_core::Result<()> {
/// use southpark_core::{CatalogScraper, Region};
/// let scraper = CatalogScraper::new(Region::De)?;
/// let catalog = scraper.build_catalog(None).await?;
/// println!("{} seasons", catalog.seasons.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CatalogScraper {
    client: SiteClient,
    profile: RegionProfile,
    manifest_service: String,
    debug_dir: Option<PathBuf>,
}

impl CatalogScraper {
    /// Create a scraper for a region with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new(region: Region) -> Result<Self> {
        Self::with_config(region.profile(), ScraperConfig::default())
    }

    /// Create a scraper for an explicit profile and configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(profile: RegionProfile, config: ScraperConfig) -> Result<Self> {
        let client = SiteClient::with_config(config.client)?;
        Ok(Self {
            client,
            profile,
            manifest_service: config.manifest_service,
            debug_dir: config.debug_dir,
        })
    }

    /// Profile of the region being scraped
    pub fn profile(&self) -> &RegionProfile {
        &self.profile
    }

    /// Build the region's catalog
    ///
    /// With a `previous` catalog only the newest season is scraped and it
    /// replaces the final season of `previous`.
    ///
    /// # Errors
    /// - `MissingPageData` if the index or a season page has no embedded data
    /// - `IncompleteSeason` if a season's continuation cannot be loaded
    /// - `HttpError` / `NotFound` if a page cannot be fetched
    pub async fn build_catalog(&self, previous: Option<Catalog>) -> Result<Catalog> {
        let seasons = self.collect_seasons(previous.is_some()).await?;
        let catalog = Catalog::new(seasons);

        Ok(match previous {
            Some(previous) => previous.merge_latest(catalog),
            None => catalog,
        })
    }

    /// Walk the season pages listed on the index page
    ///
    /// Empty seasons are dropped until the first non-empty one is found and
    /// kept afterwards. With `latest_only` the walk stops after one season.
    pub async fn collect_seasons(&self, latest_only: bool) -> Result<Vec<SeasonCatalog>> {
        let index_url = self.profile.index_url();
        let mut data = self.load_required_page(&index_url, self.profile.html_links).await?;

        let urls = season_urls(&data);
        debug!("seasons: {}", urls.len());

        let mut seasons = Vec::new();
        for (index, url) in urls.iter().enumerate() {
            let mut referer = None;
            if let Some(url) = url {
                let page_url = build_page_url(&self.profile.domain, url);
                data = self.load_required_page(&page_url, false).await?;
                referer = Some(page_url);
            }

            let episodes = self
                .parse_season(&data, index, false, referer.as_deref())
                .await?;
            if !push_season(&mut seasons, episodes) {
                debug!("skipping leading empty season {}", index + 1);
                continue;
            }
            if latest_only {
                break;
            }
        }

        Ok(seasons)
    }

    /// Parse all episodes of one season page
    ///
    /// Episodes are de-duplicated by title, numbered (backwards when
    /// `inverted`), and completed from the page's continuation if it has
    /// one. With `inverted` the result is reversed so it starts at
    /// episode 1.
    ///
    /// # Arguments
    /// * `data` - Parsed page data of the season page
    /// * `season` - 0-based season index
    /// * `inverted` - Number episodes from the end of the list
    /// * `referer` - Season page URL, sent with the continuation request
    ///
    /// # Errors
    /// `IncompleteSeason` if a continuation is advertised but cannot be
    /// loaded. Manifest failures never fail a season.
    pub async fn parse_season(
        &self,
        data: &Value,
        season: usize,
        inverted: bool,
        referer: Option<&str>,
    ) -> Result<SeasonCatalog> {
        info!("parsing episodes from season {}", season + 1);

        let layout = resolve_layout(data, self.profile.layout);
        if layout.continuation == Continuation::Unresolvable {
            return Err(CatalogError::IncompleteSeason { season: season + 1 });
        }

        let nodes = unique_episodes(&layout.episodes);
        let count = nodes.len();

        let mut episodes = Vec::with_capacity(count);
        for (index, node) in nodes.iter().enumerate() {
            let number = episode_number(index, count, inverted);
            episodes.push(self.make_episode(node, season, number).await);
        }

        if let Continuation::Url(load_more) = &layout.continuation {
            let items = self.fetch_continuation(load_more, season, referer).await?;
            for (index, node) in items.iter().enumerate() {
                let number = count + episode_number(index, items.len(), inverted);
                episodes.push(self.make_episode(node, season, number).await);
            }
        }

        if inverted {
            episodes.reverse();
        }

        Ok(episodes)
    }

    /// Build one episode record, resolving its manifests
    pub async fn make_episode(&self, node: &Value, season: usize, episode: usize) -> EpisodeRecord {
        let uuid = dig_str(node, &path!["id"]);
        let url = dig_str(node, &path!["url"]);
        let manifests = self.resolve_manifests(&uuid, &url).await;

        let record = build_episode(node, season, episode, manifests);
        info!(
            "s{:<2}e{:<2} len:{}: {}",
            record.season,
            record.episode,
            record.mediagen.len(),
            record.title
        );
        if tracing::enabled!(Level::DEBUG)
            && let Ok(json) = serde_json::to_string_pretty(&record)
        {
            debug!("{}", json);
        }

        record
    }

    /// Ask the manifest service for an episode's manifest URLs
    ///
    /// Any failure is logged and yields an empty list.
    pub async fn resolve_manifests(&self, uuid: &str, episode_url: &str) -> Vec<String> {
        let url = build_manifest_url(&self.manifest_service, &self.profile, uuid, episode_url);
        match self.client.fetch_json(&url, None).await {
            Ok(feed) => extract_manifest_urls(&feed),
            Err(e) => {
                debug!("http get: {} {}", url, e);
                Vec::new()
            }
        }
    }

    /// Load and parse a page's embedded data
    ///
    /// Returns `Ok(None)` when the page has no embedded data.
    pub async fn load_page(&self, url: &str, html_links: bool) -> Result<Option<Value>> {
        let markup = self.client.fetch_text(url, None).await?;
        self.dump("debug-data.html", markup.as_bytes());

        let data = extract_page_data(&markup, html_links)?;
        if let Some(data) = &data {
            self.dump("debug-data.json", &serde_json::to_vec_pretty(data)?);
        }

        Ok(data)
    }

    async fn load_required_page(&self, url: &str, html_links: bool) -> Result<Value> {
        self.load_page(url, html_links)
            .await?
            .ok_or_else(|| CatalogError::MissingPageData(url.to_string()))
    }

    async fn fetch_continuation(
        &self,
        load_more: &str,
        season: usize,
        referer: Option<&str>,
    ) -> Result<Vec<Value>> {
        let url = build_continuation_url(&self.profile.api_domain, load_more);
        let incomplete = CatalogError::IncompleteSeason { season: season + 1 };

        let response = match self.client.fetch_json(&url, referer).await {
            Ok(response) => response,
            Err(e) => {
                warn!("continuation {} failed: {}", url, e);
                return Err(incomplete);
            }
        };

        match response {
            Value::Object(mut map) => match map.remove("items") {
                Some(Value::Array(items)) => Ok(items),
                _ => {
                    warn!("continuation {} has no items", url);
                    Err(incomplete)
                }
            },
            _ => Err(incomplete),
        }
    }

    fn dump(&self, name: &str, contents: &[u8]) {
        let Some(dir) = &self.debug_dir else {
            return;
        };
        let path = dir.join(name);
        if let Err(e) = std::fs::write(&path, contents) {
            warn!("cannot write {}: {}", path.display(), e);
        }
    }
}

/// Append a season unless it is empty and nothing was accepted yet
///
/// Returns whether the season was kept.
pub fn push_season(seasons: &mut Vec<SeasonCatalog>, episodes: SeasonCatalog) -> bool {
    if episodes.is_empty() && seasons.is_empty() {
        return false;
    }
    seasons.push(episodes);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str) -> EpisodeRecord {
        EpisodeRecord {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_scraper_creation() {
        let scraper = CatalogScraper::new(Region::En);
        assert!(scraper.is_ok());
        assert_eq!(scraper.unwrap().profile().region, Region::En);
    }

    #[test]
    fn test_scraper_config_default() {
        let config = ScraperConfig::default();
        assert_eq!(config.manifest_service, MANIFEST_SERVICE);
        assert!(config.debug_dir.is_none());
        assert_eq!(config.client.timeout_secs, 30);
    }

    #[test]
    fn test_push_season_skips_leading_empties() {
        let results = vec![
            Vec::new(),
            Vec::new(),
            vec![episode("ep1")],
            Vec::new(),
        ];

        let mut seasons = Vec::new();
        let kept: Vec<bool> = results
            .into_iter()
            .map(|season| push_season(&mut seasons, season))
            .collect();

        assert_eq!(kept, vec![false, false, true, true]);
        assert_eq!(seasons, vec![vec![episode("ep1")], Vec::new()]);
    }

    #[tokio::test]
    async fn test_parse_season_unresolvable_continuation() {
        let scraper = CatalogScraper::new(Region::En).unwrap();
        let data = serde_json::json!({"children": [{"type": "MainContainer", "children": [
            {"type": "LineList", "props": {"items": [{"url": "/episodes/a", "meta": {"subHeader": "A"}}]}},
            {"type": "LineList", "props": {
                "type": "video-guide",
                "items": [],
                "loadMore": {"url": ""}
            }}
        ]}]});

        // fails before any request is made
        match scraper.parse_season(&data, 1, false, None).await {
            Err(CatalogError::IncompleteSeason { season }) => assert_eq!(season, 2),
            other => panic!("Expected IncompleteSeason error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_season_unknown_page_is_empty() {
        let scraper = CatalogScraper::new(Region::De).unwrap();
        let episodes = scraper
            .parse_season(&serde_json::json!({"children": []}), 0, false, None)
            .await
            .unwrap();
        assert!(episodes.is_empty());
    }
}
