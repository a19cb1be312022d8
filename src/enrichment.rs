//! Best-effort image lookup for item names.
//!
//! Queries the Pixabay search API for photos matching an item name and returns
//! the first hit's web-format URL. Every failure mode (missing key, network
//! error, bad status, malformed body, zero hits) ends in "no image": callers of
//! [`ImageSearch::find_image`] never see an error.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::PixabayConfig;

/// Default Pixabay search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Number of candidate results requested per lookup.
pub const RESULTS_PER_PAGE: u8 = 3;

/// Reasons a lookup produced no image.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// No API key is configured.
    #[error("no image search API key configured")]
    MissingKey,

    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("image search returned status {0}")]
    Status(u16),

    /// The body was not a search response.
    #[error("malformed search response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "webformatURL")]
    webformat_url: String,
}

/// Extracts the first hit's `webformatURL` from a search response body.
pub fn first_image_url(body: &str) -> Result<Option<String>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.hits.into_iter().next().map(|hit| hit.webformat_url))
}

/// Something that can find a representative image for a name.
pub trait ImageSearch {
    /// Returns an image URL for `query`, or `None` when nothing suitable was found.
    fn find_image(&self, query: &str) -> impl Future<Output = Option<String>> + Send;
}

/// Pixabay-backed image search.
#[derive(Debug, Clone)]
pub struct PixabayClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PixabayClient {
    /// Creates a client against the default endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom endpoint.
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Builds a client from configuration (key resolution, endpoint, timeout).
    pub fn from_config(config: &PixabayConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .context("Failed to build image search HTTP client")?;

        Ok(Self {
            http,
            api_key: config.resolved_api_key(),
            base_url: config.base_url.clone(),
        })
    }

    /// Whether a key is available. Without one every lookup is skipped.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Performs one search and reports why it produced no image.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Option<String>, EnrichmentError> {
        let api_key = self.api_key.as_deref().ok_or(EnrichmentError::MissingKey)?;
        let per_page = RESULTS_PER_PAGE.to_string();

        debug!("Sending image search request");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("key", api_key),
                ("q", query),
                ("image_type", "photo"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let url = first_image_url(&body)?;

        debug!(found = url.is_some(), "Image search completed");

        Ok(url)
    }
}

impl ImageSearch for PixabayClient {
    async fn find_image(&self, query: &str) -> Option<String> {
        match self.search(query).await {
            Ok(url) => url,
            Err(EnrichmentError::MissingKey) => {
                debug!("Skipping image lookup: no API key configured");
                None
            }
            Err(e) => {
                warn!(query, error = %e, "Image lookup failed");
                None
            }
        }
    }
}

/// Image search that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImageSearch;

impl ImageSearch for NoImageSearch {
    async fn find_image(&self, _query: &str) -> Option<String> {
        None
    }
}
