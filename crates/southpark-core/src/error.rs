//! Error types for the catalog scraper
//!
//! Soft lookup misses never show up here: the path accessor answers those
//! with defaults. Everything in this enum either aborts a page or the run.

use thiserror::Error;

/// Error type for all catalog scraping operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON could not be parsed or serialized
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Reading or writing a catalog file failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Embedded page data was found but is malformed
    #[error("Failed to parse page data: {0}")]
    ParseError(String),

    /// Page carries no embedded data marker
    #[error("No embedded page data found at {0}")]
    MissingPageData(String),

    /// A season advertised more episodes that could not be loaded
    #[error("Cannot fetch all episodes of season {season}")]
    IncompleteSeason {
        /// 1-based season number
        season: usize,
    },

    /// Resource not found on server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Unknown region code
    #[error("Unknown region: {0}")]
    InvalidRegion(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
