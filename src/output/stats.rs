//! Statistics gathered from the on-disk stores
//!
//! This module provides functionality for inspecting what earlier runs left
//! behind without touching the catalog.

use crate::config::Config;
use crate::ledger::CompletionLedger;
use crate::storage::{open_cover_store, open_metadata_store, Store};
use crate::HarvestError;

/// Harvest statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestStatistics {
    /// Distinct source files recorded as done
    pub ledger_entries: usize,

    /// Metadata records on disk
    pub metadata_records: usize,

    /// Cover images on disk
    pub covers: usize,
}

impl HarvestStatistics {
    /// Share of metadata records that have a cover, as a percentage
    pub fn cover_rate(&self) -> f64 {
        if self.metadata_records == 0 {
            return 0.0;
        }
        (self.covers as f64 / self.metadata_records as f64) * 100.0
    }
}

/// Loads statistics from the configured stores
///
/// Directories that do not exist yet count as empty and are not created.
pub fn load_statistics(config: &Config) -> Result<HarvestStatistics, HarvestError> {
    let ledger = CompletionLedger::load(&config.paths.ledger_path).map_err(|source| {
        HarvestError::Ledger {
            path: config.paths.ledger_path.clone(),
            source,
        }
    })?;

    let metadata_records = if config.paths.metadata_dir.is_dir() {
        open_metadata_store(&config.paths.metadata_dir)?.count()?
    } else {
        0
    };

    let covers = if config.paths.covers_dir.is_dir() {
        open_cover_store(&config.paths.covers_dir)?.count()?
    } else {
        0
    };

    Ok(HarvestStatistics {
        ledger_entries: ledger.len(),
        metadata_records,
        covers,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");
    println!("  Files done: {}", stats.ledger_entries);
    println!("  Metadata records: {}", stats.metadata_records);
    println!(
        "  Covers: {} ({:.1}% of records)",
        stats.covers,
        stats.cover_rate()
    );
}
