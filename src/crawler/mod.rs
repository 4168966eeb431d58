//! Crawler module for catalog harvesting
//!
//! This module contains the core harvesting logic, including:
//! - Fetching and persisting one identifier with its cover
//! - The sequential, quota-aware harvest loop
//! - Planning a run without touching the network

mod coordinator;
mod fetcher;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::Coordinator;
pub use fetcher::{fetch_and_persist, secure_image_url, IdentifierError, PersistOptions, Saved};

use crate::catalog::HttpCatalog;
use crate::config::{resolve_api_key, Config};
use crate::ledger::CompletionLedger;
use crate::output::{ProgressSink, RunSummary};
use crate::query::NoiseFilter;
use crate::scanner::{list_candidate_files, SourceItem};
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point for starting a run. It will:
/// 1. Resolve the catalog API key (a missing key aborts before any work)
/// 2. Discover candidate files under the library directory
/// 3. Build the HTTP catalog client
/// 4. Process every file until done or until the quota runs out
///
/// # Arguments
///
/// * `config` - The harvester configuration
/// * `sink` - Receiver for progress events and the final summary
/// * `config_hash` - Hash of the configuration file, echoed in the summary
///
/// # Returns
///
/// * `Ok(RunSummary)` - The run ended, normally or by quota
/// * `Err(HarvestError)` - The run could not start or the ledger failed
pub async fn crawl(
    config: &Config,
    sink: Box<dyn ProgressSink>,
    config_hash: Option<String>,
) -> Result<RunSummary, HarvestError> {
    let api_key = resolve_api_key(&config.catalog)?;

    let items = list_candidate_files(&config.paths.library_dir, &config.scan.extensions)?;
    let catalog = HttpCatalog::new(&config.catalog, Some(api_key))?;

    let mut coordinator = Coordinator::new(config, Box::new(catalog), sink)?;
    if let Some(hash) = config_hash {
        coordinator = coordinator.with_config_hash(hash);
    }

    coordinator.run(&items).await
}

/// A source file as the next run would see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub item: SourceItem,

    /// Query the catalog search would receive
    pub query: String,

    /// True if the ledger already records this file
    pub done: bool,
}

/// Lists what a run would do, without any network access
pub fn plan_run(config: &Config) -> Result<Vec<PlannedItem>, HarvestError> {
    let ledger = CompletionLedger::load(&config.paths.ledger_path).map_err(|source| {
        HarvestError::Ledger {
            path: config.paths.ledger_path.clone(),
            source,
        }
    })?;
    let noise = NoiseFilter::new(&config.query.noise_patterns)?;

    let planned = list_candidate_files(&config.paths.library_dir, &config.scan.extensions)?
        .into_iter()
        .map(|item| PlannedItem {
            query: noise.apply(&item.title),
            done: ledger.contains(&item.path),
            item,
        })
        .collect();

    Ok(planned)
}
