//! HTTP catalog client
//!
//! This module handles all HTTP requests to the catalog, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Volume searches and per-ISBN lookups
//! - Cover image downloads
//! - Mapping HTTP statuses and transport errors onto [`CatalogError`]

use crate::catalog::response::{FetchedVolume, VolumesResponse};
use crate::catalog::{Catalog, CatalogError, CatalogResult};
use crate::config::CatalogConfig;
use crate::identifier::IndustryIdentifier;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The catalog configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CatalogConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Catalog backed by a Google Books style `volumes` endpoint
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    volumes_url: String,
    api_key: Option<String>,
    max_results: u32,
}

impl HttpCatalog {
    /// Creates a client for the catalog described by `config`
    ///
    /// The API key is passed separately so it can come from the environment.
    pub fn new(config: &CatalogConfig, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, config, api_key))
    }

    /// Creates a catalog around an existing client
    pub fn with_client(client: Client, config: &CatalogConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            volumes_url: format!("{}/volumes", config.base_url.trim_end_matches('/')),
            api_key,
            max_results: config.max_results,
        }
    }

    /// Runs a `volumes` query and returns the raw body
    async fn query_volumes(&self, q: &str, max_results: Option<u32>) -> CatalogResult<String> {
        let mut params: Vec<(&str, String)> = vec![("q", q.to_string())];
        if let Some(max) = max_results {
            params.push(("maxResults", max.to_string()));
        }
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        let response = self
            .client
            .get(&self.volumes_url)
            .query(&params)
            .send()
            .await
            .map_err(classify_request_error)?;

        let response = check_status(response, "volumes")?;
        response.text().await.map_err(classify_request_error)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search(&self, query: &str) -> CatalogResult<Vec<IndustryIdentifier>> {
        tracing::debug!("Searching catalog for {:?}", query);
        let body = self.query_volumes(query, Some(self.max_results)).await?;

        let parsed: VolumesResponse = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Transient(format!("Invalid search response: {}", e)))?;

        Ok(parsed.identifiers())
    }

    async fn fetch_by_isbn(&self, isbn: &str) -> CatalogResult<FetchedVolume> {
        tracing::debug!("Fetching volume for ISBN {}", isbn);
        let body = self.query_volumes(&format!("isbn:{}", isbn), None).await?;

        FetchedVolume::from_body(body)
            .map_err(|e| CatalogError::Transient(format!("Invalid volume response: {}", e)))
    }

    async fn fetch_image(&self, url: &str) -> CatalogResult<Vec<u8>> {
        tracing::debug!("Downloading image {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_request_error)?;

        let response = check_status(response, url)?;
        let bytes = response.bytes().await.map_err(classify_request_error)?;
        Ok(bytes.to_vec())
    }
}

/// Maps a non-success response onto a catalog error
fn check_status(response: Response, context: &str) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::from_status(status.as_u16(), context))
    }
}

/// Classifies transport-level failures
///
/// None of these are quota signals, so they all end up transient.
fn classify_request_error(e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Transient("Request timeout".to_string())
    } else if e.is_connect() {
        CatalogError::Transient(format!("Connection failed: {}", e))
    } else {
        CatalogError::Transient(e.to_string())
    }
}
