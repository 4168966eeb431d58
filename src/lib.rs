//! isbn-harvest: a quota-aware book metadata harvester
//!
//! This crate walks a local book collection, derives a search query from each
//! filename, looks the book up in a remote catalog, and persists the catalog's
//! metadata and cover image for every ISBN found. Work finished in earlier runs
//! is never repeated, and the first rate-limit signal from the catalog stops
//! the run.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod identifier;
pub mod ledger;
pub mod output;
pub mod query;
pub mod scanner;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for isbn-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Failed to update ledger {}: {source}", path.display())]
    Ledger {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to scan {}: {message}", root.display())]
    Scan { root: PathBuf, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid noise pattern: {0}")]
    InvalidPattern(String),

    #[error("Missing required setting: {0}")]
    Missing(String),
}

// Re-export commonly used types
pub use config::Config;
pub use identifier::{collect_identifiers, normalize_isbn10};
pub use query::{build_query, NoiseFilter};
pub use state::{QuotaBreaker, RunState};
