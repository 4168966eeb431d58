//! Per-identifier fetch and persist
//!
//! This module handles everything that happens for one ISBN once the crawl
//! loop has decided it needs fetching:
//! - Fetching the volume list from the catalog
//! - Writing the raw response as the metadata record
//! - Downloading the cover image, best-effort
//! - Tripping the quota breaker when the volume fetch signals quota

use crate::catalog::{Catalog, CatalogError};
use crate::state::RunState;
use crate::storage::{StorageError, Store};
use thiserror::Error;
use url::Url;

/// Outcome of a successful fetch-and-persist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saved {
    /// True if a cover image was written alongside the record
    pub cover_saved: bool,
}

/// Reasons an identifier attempt did not produce a metadata record
#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("Quota exceeded (HTTP {status})")]
    QuotaExceeded { status: u16 },

    #[error("No volume found")]
    NotFound,

    #[error("{0}")]
    Transient(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CatalogError> for IdentifierError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::QuotaExceeded { status } => Self::QuotaExceeded { status },
            CatalogError::Transient(message) => Self::Transient(message),
        }
    }
}

/// Knobs for [`fetch_and_persist`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistOptions {
    /// Upgrade `http://` cover links to `https://`
    pub secure_images: bool,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            secure_images: true,
        }
    }
}

/// Fetches one ISBN and persists its metadata record and cover
///
/// # Flow
///
/// 1. Fetch the volume list for `isbn`
///    - HTTP 429/403 → trip the breaker, `QuotaExceeded`
///    - any other failure → `Transient`
///    - empty result list → `NotFound`
/// 2. Write the raw body as the metadata record
/// 3. If the first volume has a thumbnail, download it and write the cover.
///    Failures here, quota statuses included, are logged only; the record is
///    already on disk and image hosts answer 403 for unrelated reasons.
///
/// Callers are expected to have checked that no record exists yet.
pub async fn fetch_and_persist(
    catalog: &dyn Catalog,
    isbn: &str,
    metadata: &dyn Store,
    covers: &dyn Store,
    options: &PersistOptions,
    state: &mut RunState,
) -> Result<Saved, IdentifierError> {
    let volume = match catalog.fetch_by_isbn(isbn).await {
        Ok(volume) => volume,
        Err(CatalogError::QuotaExceeded { status }) => {
            state.breaker.trip(status);
            return Err(IdentifierError::QuotaExceeded { status });
        }
        Err(e) => return Err(e.into()),
    };

    if !volume.found {
        return Err(IdentifierError::NotFound);
    }

    metadata.write_text(isbn, &volume.raw_body)?;
    tracing::debug!("Saved metadata record for {}", isbn);

    let cover_saved = match volume.thumbnail_url {
        Some(url) => save_cover(catalog, isbn, &url, covers, options).await,
        None => false,
    };

    Ok(Saved { cover_saved })
}

/// Downloads and writes a cover image; returns true if a file was written
async fn save_cover(
    catalog: &dyn Catalog,
    isbn: &str,
    url: &str,
    covers: &dyn Store,
    options: &PersistOptions,
) -> bool {
    match covers.exists(isbn) {
        Ok(true) => return false,
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("Cannot check cover for {}: {}", isbn, e);
            return false;
        }
    }

    let url = if options.secure_images {
        secure_image_url(url)
    } else {
        url.to_string()
    };

    let bytes = match catalog.fetch_image(&url).await {
        Ok(bytes) if !bytes.is_empty() => bytes,
        Ok(_) => {
            tracing::warn!("Empty cover image for {} at {}", isbn, url);
            return false;
        }
        Err(e) => {
            tracing::warn!("Cover download failed for {}: {}", isbn, e);
            return false;
        }
    };

    match covers.write_bytes(isbn, &bytes) {
        Ok(()) => {
            tracing::debug!("Saved cover for {} ({} bytes)", isbn, bytes.len());
            true
        }
        Err(e) => {
            tracing::warn!("Failed to write cover for {}: {}", isbn, e);
            false
        }
    }
}

/// Rewrites an `http` image link to `https`
///
/// Anything that does not parse, or uses another scheme, is returned as-is.
///
/// # Examples
///
/// ```
/// use isbn_harvest::crawler::secure_image_url;
///
/// assert_eq!(
///     secure_image_url("http://books.example.com/cover?id=1&zoom=1"),
///     "https://books.example.com/cover?id=1&zoom=1"
/// );
/// ```
pub fn secure_image_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) if parsed.scheme() == "http" => match parsed.set_scheme("https") {
            Ok(()) => parsed.to_string(),
            Err(()) => url.to_string(),
        },
        _ => url.to_string(),
    }
}
