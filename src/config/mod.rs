//! Configuration module for isbn-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and writes a default file on first run.
//!
//! # Example
//!
//! ```no_run
//! use isbn_harvest::config::load_or_create_config;
//! use std::path::Path;
//!
//! let (config, _created) = load_or_create_config(Path::new("isbn-harvest.toml")).unwrap();
//! println!("Metadata goes to: {}", config.paths.metadata_dir.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, PathsConfig, QueryConfig, ScanConfig};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, load_or_create_config,
    resolve_api_key, DEFAULT_CONFIG,
};
