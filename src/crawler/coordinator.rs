//! Crawler coordinator - main harvest loop
//!
//! This module drives a run from the list of source items to the final
//! summary:
//! - Skipping items already recorded in the ledger
//! - Searching the catalog for each remaining item
//! - Fetching and persisting every identifier not yet on disk
//! - Stopping everything on the first quota signal

use crate::catalog::{Catalog, CatalogError};
use crate::config::Config;
use crate::crawler::fetcher::{fetch_and_persist, IdentifierError, PersistOptions};
use crate::identifier::collect_identifiers;
use crate::ledger::CompletionLedger;
use crate::output::{ProgressEvent, ProgressSink, RunSummary};
use crate::query::NoiseFilter;
use crate::scanner::SourceItem;
use crate::state::{ItemState, RunPhase, RunState};
use crate::storage::{open_cover_store, open_metadata_store, FsStore, Store};
use crate::HarvestError;
use chrono::Utc;
use std::time::{Duration, Instant};

/// Main harvest coordinator
///
/// Owns everything a run touches. Processing is strictly sequential: one
/// outstanding catalog request at a time.
pub struct Coordinator {
    catalog: Box<dyn Catalog>,
    ledger: CompletionLedger,
    metadata: FsStore,
    covers: FsStore,
    noise: NoiseFilter,
    options: PersistOptions,
    request_delay: Duration,
    sink: Box<dyn ProgressSink>,
    config_hash: Option<String>,
}

impl Coordinator {
    /// Creates a coordinator from configuration
    ///
    /// Opens (and creates) the metadata and cover directories, loads the
    /// ledger, and compiles the noise patterns.
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    /// * `catalog` - Catalog to query
    /// * `sink` - Receiver for progress events and the summary
    pub fn new(
        config: &Config,
        catalog: Box<dyn Catalog>,
        sink: Box<dyn ProgressSink>,
    ) -> Result<Self, HarvestError> {
        let metadata = open_metadata_store(&config.paths.metadata_dir)?;
        let covers = open_cover_store(&config.paths.covers_dir)?;

        let ledger_path = &config.paths.ledger_path;
        let ledger = CompletionLedger::load(ledger_path).map_err(|source| HarvestError::Ledger {
            path: ledger_path.clone(),
            source,
        })?;

        let noise = NoiseFilter::new(&config.query.noise_patterns)?;

        Ok(Self {
            catalog,
            ledger,
            metadata,
            covers,
            noise,
            options: PersistOptions {
                secure_images: config.catalog.secure_images,
            },
            request_delay: Duration::from_millis(config.catalog.request_delay_ms),
            sink,
            config_hash: None,
        })
    }

    /// Attaches the config hash reported in the summary
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Runs the harvest over `items` in order
    ///
    /// Returns the run summary, which has also been handed to the sink. Only
    /// a ledger write failure aborts the run with an error; catalog failures
    /// are counted and the quota signal ends the run normally.
    pub async fn run(&mut self, items: &[SourceItem]) -> Result<RunSummary, HarvestError> {
        let started_at = Utc::now().to_rfc3339();
        let clock = Instant::now();
        let mut state = RunState::new(items.len());

        tracing::info!("Starting harvest of {} source files", items.len());

        for (index, item) in items.iter().enumerate() {
            if state.breaker.is_tripped() {
                tracing::info!(
                    "Quota exhausted, leaving {} files for the next run",
                    items.len() - index
                );
                break;
            }

            if self.ledger.contains(&item.path) {
                tracing::debug!("Already processed: {}", item.path.display());
                state.skipped_by_ledger += 1;
                self.sink.on_event(ProgressEvent::ItemSkipped {
                    path: item.path.clone(),
                });
                continue;
            }

            let outcome = self.process_item(index, items.len(), item, &mut state).await?;
            state.record_item(outcome);
        }

        state.finish();
        tracing::info!(
            "Harvest {}: {} saved, {} already on disk, {} not found",
            state.phase(),
            state.saved,
            state.skipped_existing,
            state.not_found
        );

        let summary = RunSummary::from_state(
            &state,
            started_at,
            Utc::now().to_rfc3339(),
            clock.elapsed(),
            self.config_hash.clone(),
        );
        self.sink.on_summary(&summary);
        state.advance(RunPhase::Reported);

        Ok(summary)
    }

    /// Processes one source item and returns its terminal state
    async fn process_item(
        &mut self,
        index: usize,
        total: usize,
        item: &SourceItem,
        state: &mut RunState,
    ) -> Result<ItemState, HarvestError> {
        let mut item_state = ItemState::Pending;
        let query = self.noise.apply(&item.title);

        tracing::info!("[{}/{}] Searching: {}", index + 1, total, query);
        self.sink.on_event(ProgressEvent::ItemStarted {
            index,
            total,
            title: item.title.clone(),
            query: query.clone(),
        });
        advance_item(&mut item_state, ItemState::Searching);

        let identifiers = match self.catalog.search(&query).await {
            Ok(entries) => {
                let identifiers = collect_identifiers(&entries);
                tracing::debug!("Search for {:?} returned {} identifiers", query, identifiers.len());
                self.sink.on_event(ProgressEvent::IdentifiersFound {
                    count: identifiers.len(),
                });
                identifiers
            }
            Err(CatalogError::QuotaExceeded { status }) => {
                state.breaker.trip(status);
                self.sink.on_event(ProgressEvent::QuotaExceeded { status });
                advance_item(&mut item_state, ItemState::Abandoned);
                return Ok(self.finish_item(item, item_state));
            }
            Err(e) => {
                // The item still counts as done once its (empty) identifier
                // list has been worked through.
                tracing::warn!("Search failed for {:?}: {}", query, e);
                state.search_errors += 1;
                self.sink.on_event(ProgressEvent::SearchFailed {
                    error: e.to_string(),
                });
                Vec::new()
            }
        };

        advance_item(&mut item_state, ItemState::Identifiers);

        for isbn in &identifiers {
            if state.breaker.is_tripped() {
                break;
            }
            self.process_identifier(isbn, state).await;
        }

        if state.breaker.is_tripped() {
            advance_item(&mut item_state, ItemState::Abandoned);
        } else {
            self.ledger
                .mark_done(&item.path)
                .map_err(|source| HarvestError::Ledger {
                    path: self.ledger.path().to_path_buf(),
                    source,
                })?;
            advance_item(&mut item_state, ItemState::Done);
        }

        Ok(self.finish_item(item, item_state))
    }

    /// Handles one identifier: skip if on disk, otherwise fetch and persist
    async fn process_identifier(&mut self, isbn: &str, state: &mut RunState) {
        match self.metadata.exists(isbn) {
            Ok(true) => {
                tracing::debug!("Metadata for {} already on disk", isbn);
                state.skipped_existing += 1;
                self.sink.on_event(ProgressEvent::IdentifierSkipped {
                    isbn: isbn.to_string(),
                });
                return;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("Cannot check metadata for {}: {}", isbn, e);
                state.identifier_errors += 1;
                self.sink.on_event(ProgressEvent::IdentifierFailed {
                    isbn: isbn.to_string(),
                    error: e.to_string(),
                });
                return;
            }
        }

        let result = fetch_and_persist(
            self.catalog.as_ref(),
            isbn,
            &self.metadata,
            &self.covers,
            &self.options,
            state,
        )
        .await;

        match result {
            Ok(saved) => {
                tracing::info!("Saved {}", isbn);
                state.saved += 1;
                if saved.cover_saved {
                    state.covers_saved += 1;
                }
                self.sink.on_event(ProgressEvent::IdentifierSaved {
                    isbn: isbn.to_string(),
                    cover_saved: saved.cover_saved,
                });
            }
            Err(IdentifierError::QuotaExceeded { status }) => {
                self.sink.on_event(ProgressEvent::QuotaExceeded { status });
            }
            Err(IdentifierError::NotFound) => {
                tracing::info!("No catalog entry for {}", isbn);
                state.not_found += 1;
                self.sink.on_event(ProgressEvent::IdentifierNotFound {
                    isbn: isbn.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!("Failed to harvest {}: {}", isbn, e);
                state.identifier_errors += 1;
                self.sink.on_event(ProgressEvent::IdentifierFailed {
                    isbn: isbn.to_string(),
                    error: e.to_string(),
                });
            }
        }

        if state.breaker.is_tripped() {
            return;
        }
        self.pace().await;
    }

    async fn pace(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }

    fn finish_item(&mut self, item: &SourceItem, item_state: ItemState) -> ItemState {
        self.sink.on_event(ProgressEvent::ItemFinished {
            path: item.path.clone(),
            state: item_state,
        });
        item_state
    }
}

fn advance_item(current: &mut ItemState, next: ItemState) {
    if current.can_transition_to(next) {
        *current = next;
    } else {
        tracing::warn!("Ignoring item transition {} -> {}", current, next);
    }
}
