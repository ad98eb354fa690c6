//! HTTP client for the regional sites and the manifest service
//!
//! Every request is a single attempt: the caller decides whether a failure
//! is absorbed or ends the run.

use std::time::Duration;

use reqwest::header::REFERER;
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogError, Result};

/// Browser user agent sent with every request
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; rv:25.0) Gecko/20100101 Firefox/25.0";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// HTTP client wrapper
///
/// Sends the browser user agent and, when given, a `Referer` header.
#[derive(Debug, Clone)]
pub struct SiteClient {
    client: reqwest::Client,
}

impl SiteClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(CatalogError::HttpError)?;

        Ok(Self { client })
    }

    /// Fetch a page as text
    ///
    /// # Errors
    /// - `InvalidUrl` - empty URL
    /// - `NotFound` - server answered 404
    /// - `HttpError` - network errors and other non-success statuses
    pub async fn fetch_text(&self, url: &str, referer: Option<&str>) -> Result<String> {
        let response = self.send(url, referer).await?;
        response.text().await.map_err(CatalogError::HttpError)
    }

    /// Fetch a JSON document
    ///
    /// # Errors
    /// Same as [`SiteClient::fetch_text`], plus `HttpError` when the body
    /// is not JSON.
    pub async fn fetch_json(&self, url: &str, referer: Option<&str>) -> Result<Value> {
        let response = self.send(url, referer).await?;
        response.json::<Value>().await.map_err(CatalogError::HttpError)
    }

    async fn send(&self, url: &str, referer: Option<&str>) -> Result<reqwest::Response> {
        if url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("empty URL".to_string()));
        }

        debug!("http get: {}", url);

        let mut request = self.client.get(url);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await.map_err(CatalogError::HttpError)?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }

        response.error_for_status().map_err(CatalogError::HttpError)
    }
}
