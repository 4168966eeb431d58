//! Remote catalog access
//!
//! The crawl loop talks to the catalog only through the [`Catalog`] trait:
//! - searching volumes by free-text query
//! - fetching the volume list for one ISBN
//! - downloading cover images
//!
//! [`HttpCatalog`] implements it against a Google Books style `volumes` API.

mod client;
mod response;

pub use client::{build_http_client, HttpCatalog};
pub use response::{FetchedVolume, VolumesResponse};

use crate::identifier::IndustryIdentifier;
use crate::state::is_quota_status;
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// HTTP 429 or 403: the request budget is gone for this run
    #[error("Quota exceeded (HTTP {status})")]
    QuotaExceeded { status: u16 },

    /// Any other failure; callers log it and move on
    #[error("Transient catalog failure: {0}")]
    Transient(String),
}

impl CatalogError {
    /// Maps a non-success HTTP status to an error
    pub fn from_status(status: u16, context: &str) -> Self {
        if is_quota_status(status) {
            Self::QuotaExceeded { status }
        } else {
            Self::Transient(format!("HTTP {} from {}", status, context))
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Remote book catalog
///
/// Implementations issue exactly one remote request per call and never retry;
/// pacing and quota handling belong to the caller.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Searches volumes and returns every identifier attached to any result
    async fn search(&self, query: &str) -> CatalogResult<Vec<IndustryIdentifier>>;

    /// Fetches the volume list for one ISBN
    async fn fetch_by_isbn(&self, isbn: &str) -> CatalogResult<FetchedVolume>;

    /// Downloads an image
    async fn fetch_image(&self, url: &str) -> CatalogResult<Vec<u8>>;
}
