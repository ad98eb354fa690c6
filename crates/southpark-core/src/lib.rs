//! South Park Catalog Core Library
//!
//! Scrapes the regional South Park sites into per-language episode catalogs
//! consumed by the media addon.
//!
//! # Overview
//!
//! Season pages are server rendered with their state embedded as a JSON
//! literal. This crate provides:
//! - An extractor for that embedded data
//! - A tolerant path accessor for the schema-less data tree
//! - Season layout resolution per regional site, with "load more" pagination
//! - Manifest resolution and episode normalization
//! - A high-level scraper that walks every season and builds a [`Catalog`]
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use southpark_core::{CatalogScraper, Region, Result, store};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = CatalogScraper::new(Region::En)?;
//!     let catalog = scraper.build_catalog(None).await?;
//!
//!     for (i, season) in catalog.seasons.iter().enumerate() {
//!         println!("season {}: {} episodes", i + 1, season.len());
//!     }
//!
//!     store::write_catalog(&store::catalog_path(Path::new("."), Region::En), &catalog)?;
//!     Ok(())
//! }
//! ```
//!
//! # Manifest references
//!
//! [`EpisodeRecord::mediagen`] entries are base64 encoded manifest URLs;
//! use [`mediagen::decode_manifest`] to read them back.

mod client;
mod error;
pub mod mediagen;
pub mod parser;
pub mod path;
mod region;
mod scraper;
pub mod store;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, SiteClient};

// Re-export error types
pub use error::{CatalogError, Result};

// Re-export parser functions
pub use parser::{build_episode, extract_page_data, resolve_layout, season_urls};

// Re-export region configuration
pub use region::{Layout, Region, RegionProfile};

// Re-export main scraper API
pub use scraper::{CatalogScraper, ScraperConfig, push_season};

// Re-export data types
pub use types::{Catalog, EpisodeRecord, SeasonCatalog};
