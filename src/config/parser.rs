use crate::config::types::{CatalogConfig, Config};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Configuration written on first run when no file exists yet
pub const DEFAULT_CONFIG: &str = r#"# isbn-harvest configuration

[paths]
library-dir = "./library"
metadata-dir = "./metadata"
covers-dir = "./covers"
ledger-path = "./processed.txt"

[catalog]
base-url = "https://www.googleapis.com/books/v1"
# Read the key from this environment variable, or set api-key directly.
api-key-env = "GOOGLE_BOOKS_API_KEY"
max-results = 10
request-delay-ms = 1000
timeout-secs = 30
secure-images = true

[scan]
extensions = ["pdf", "epub"]

[query]
# Case-insensitive regular expressions stripped from file names.
noise-patterns = [
    '\(Z-Library\)',
    'z-lib\.org',
    '\(libgen\.[a-z]+\)',
]
"#;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use isbn_harvest::config::load_config;
///
/// let config = load_config(Path::new("isbn-harvest.toml")).unwrap();
/// println!("Scanning: {}", config.paths.library_dir.display());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Loads a configuration, writing [`DEFAULT_CONFIG`] first if the file is absent
///
/// # Returns
///
/// * `Ok((Config, bool))` - The configuration and whether it was just created
/// * `Err(ConfigError)` - Failed to write, read, parse, or validate the file
pub fn load_or_create_config(path: &Path) -> Result<(Config, bool), ConfigError> {
    let created = if path.exists() {
        false
    } else {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, DEFAULT_CONFIG)?;
        tracing::info!("Created default configuration at {}", path.display());
        true
    };

    Ok((load_config(path)?, created))
}

/// Computes a SHA-256 hash of the configuration file content
///
/// This is recorded in the run summary so reports can be matched to the
/// configuration that produced them.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads (or creates) a configuration and returns it with its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let (config, _) = load_or_create_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Resolves the catalog API key from the config or the environment
///
/// A missing key is fatal: the run must not start without a credential.
pub fn resolve_api_key(config: &CatalogConfig) -> Result<String, ConfigError> {
    resolve_api_key_with(config, |name| std::env::var(name).ok())
}

fn resolve_api_key_with<F>(config: &CatalogConfig, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = config.api_key.as_deref().map(str::trim) {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    match lookup(&config.api_key_env) {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::Missing(format!(
            "catalog API key: set catalog.api-key or the {} environment variable",
            config.api_key_env
        ))),
    }
}
