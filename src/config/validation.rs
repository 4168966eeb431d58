use crate::config::types::{CatalogConfig, Config, PathsConfig, QueryConfig, ScanConfig};
use crate::query::NoiseFilter;
use crate::ConfigError;
use std::path::Path;
use url::Url;

/// Upper bound the volumes API accepts for `maxResults`
const MAX_RESULTS_LIMIT: u32 = 40;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_paths_config(&config.paths)?;
    validate_catalog_config(&config.catalog)?;
    validate_scan_config(&config.scan)?;
    validate_query_config(&config.query)?;
    Ok(())
}

/// Validates path configuration
fn validate_paths_config(config: &PathsConfig) -> Result<(), ConfigError> {
    require_path("library-dir", &config.library_dir)?;
    require_path("metadata-dir", &config.metadata_dir)?;
    require_path("covers-dir", &config.covers_dir)?;
    require_path("ledger-path", &config.ledger_path)?;

    if config.metadata_dir == config.covers_dir {
        return Err(ConfigError::Validation(
            "metadata-dir and covers-dir must be different directories".to_string(),
        ));
    }

    Ok(())
}

/// Validates catalog client configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.max_results < 1 || config.max_results > MAX_RESULTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-results must be between 1 and {}, got {}",
            MAX_RESULTS_LIMIT, config.max_results
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.api_key_env.trim().is_empty() && config.api_key.is_none() {
        return Err(ConfigError::Validation(
            "either api-key or api-key-env must be set".to_string(),
        ));
    }

    Ok(())
}

/// Validates scan configuration
fn validate_scan_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.extensions.is_empty() {
        return Err(ConfigError::Validation(
            "scan.extensions must list at least one extension".to_string(),
        ));
    }

    for ext in &config.extensions {
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Invalid extension '{}': use the bare extension, e.g. 'pdf'",
                ext
            )));
        }
    }

    Ok(())
}

/// Validates that every noise pattern compiles
fn validate_query_config(config: &QueryConfig) -> Result<(), ConfigError> {
    NoiseFilter::new(&config.noise_patterns)?;
    Ok(())
}

fn require_path(name: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config {
            paths: PathsConfig {
                library_dir: PathBuf::from("./library"),
                metadata_dir: PathBuf::from("./metadata"),
                covers_dir: PathBuf::from("./covers"),
                ledger_path: PathBuf::from("./processed.txt"),
            },
            catalog: CatalogConfig::default(),
            scan: ScanConfig::default(),
            query: QueryConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut config = valid_config();
        config.paths.metadata_dir = PathBuf::new();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_shared_output_dir_rejected() {
        let mut config = valid_config();
        config.paths.covers_dir = config.paths.metadata_dir.clone();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = valid_config();
        config.catalog.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.catalog.base_url = "ftp://example.com/books".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_max_results_bounds() {
        let mut config = valid_config();
        config.catalog.max_results = 0;
        assert!(validate(&config).is_err());
        config.catalog.max_results = 41;
        assert!(validate(&config).is_err());
        config.catalog.max_results = 40;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_extensions() {
        let mut config = valid_config();
        config.scan.extensions = vec![];
        assert!(validate(&config).is_err());
        config.scan.extensions = vec![".pdf".to_string()];
        assert!(validate(&config).is_err());
        config.scan.extensions = vec!["mobi".to_string()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_noise_pattern() {
        let mut config = valid_config();
        config.query.noise_patterns = vec![r"\(Z-Library\)".to_string(), "[unclosed".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
