//! Scripted catalog and recording sink shared by the crawler unit tests

use crate::catalog::{Catalog, CatalogError, CatalogResult, FetchedVolume};
use crate::config::{CatalogConfig, Config, PathsConfig, QueryConfig, ScanConfig};
use crate::identifier::{IndustryIdentifier, ISBN_10, ISBN_13};
use crate::output::{ProgressEvent, ProgressSink, RunSummary};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Catalog answering from fixed tables and recording every call
///
/// Unknown queries return no identifiers, unknown ISBNs return an empty
/// volume list, and unknown image URLs fail transiently.
#[derive(Default)]
pub struct ScriptedCatalog {
    searches: HashMap<String, CatalogResult<Vec<IndustryIdentifier>>>,
    volumes: HashMap<String, CatalogResult<FetchedVolume>>,
    images: HashMap<String, CatalogResult<Vec<u8>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, identifiers: Vec<IndustryIdentifier>) -> Self {
        self.searches.insert(query.to_string(), Ok(identifiers));
        self
    }

    pub fn with_search_error(mut self, query: &str, error: CatalogError) -> Self {
        self.searches.insert(query.to_string(), Err(error));
        self
    }

    pub fn with_volume(mut self, isbn: &str, volume: FetchedVolume) -> Self {
        self.volumes.insert(isbn.to_string(), Ok(volume));
        self
    }

    pub fn with_volume_error(mut self, isbn: &str, error: CatalogError) -> Self {
        self.volumes.insert(isbn.to_string(), Err(error));
        self
    }

    pub fn with_image(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.images.insert(url.to_string(), Ok(bytes));
        self
    }

    pub fn with_image_error(mut self, url: &str, error: CatalogError) -> Self {
        self.images.insert(url.to_string(), Err(error));
        self
    }

    /// Shared handle to the call log, usable after the catalog is boxed
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    async fn search(&self, query: &str) -> CatalogResult<Vec<IndustryIdentifier>> {
        self.record(format!("search:{}", query));
        self.searches.get(query).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_by_isbn(&self, isbn: &str) -> CatalogResult<FetchedVolume> {
        self.record(format!("fetch:{}", isbn));
        self.volumes.get(isbn).cloned().unwrap_or_else(|| {
            Ok(FetchedVolume {
                found: false,
                raw_body: r#"{"kind": "books#volumes", "totalItems": 0}"#.to_string(),
                thumbnail_url: None,
            })
        })
    }

    async fn fetch_image(&self, url: &str) -> CatalogResult<Vec<u8>> {
        self.record(format!("image:{}", url));
        self.images
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(CatalogError::Transient(format!("HTTP 404 from {}", url))))
    }
}

/// Sink keeping every event and the final summary
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<ProgressEvent>>>,
    pub summary: Arc<Mutex<Option<RunSummary>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn summary(&self) -> Option<RunSummary> {
        self.summary.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn on_event(&mut self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn on_summary(&mut self, summary: &RunSummary) {
        *self.summary.lock().unwrap() = Some(summary.clone());
    }
}

/// A found volume, optionally with a thumbnail link
pub fn volume(thumbnail: Option<&str>) -> FetchedVolume {
    let links = thumbnail
        .map(|url| format!(r#", "imageLinks": {{"thumbnail": "{}"}}"#, url))
        .unwrap_or_default();
    FetchedVolume {
        found: true,
        raw_body: format!(
            r#"{{"kind": "books#volumes", "totalItems": 1, "items": [{{"volumeInfo": {{"title": "Test"{}}}}}]}}"#,
            links
        ),
        thumbnail_url: thumbnail.map(str::to_string),
    }
}

pub fn isbn10(value: &str) -> IndustryIdentifier {
    IndustryIdentifier::new(ISBN_10, value)
}

pub fn isbn13(value: &str) -> IndustryIdentifier {
    IndustryIdentifier::new(ISBN_13, value)
}

/// Config rooted in `dir` with no pacing and no https upgrade
pub fn test_config(dir: &Path) -> Config {
    Config {
        paths: PathsConfig {
            library_dir: dir.join("library"),
            metadata_dir: dir.join("metadata"),
            covers_dir: dir.join("covers"),
            ledger_path: dir.join("processed.txt"),
        },
        catalog: CatalogConfig {
            api_key: Some("test-key".to_string()),
            request_delay_ms: 0,
            secure_images: false,
            ..CatalogConfig::default()
        },
        scan: ScanConfig::default(),
        query: QueryConfig {
            noise_patterns: vec![r"\(Z-Library\)".to_string()],
        },
    }
}
