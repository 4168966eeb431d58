use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for isbn-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

/// Locations of the scanned library and of everything the harvester writes
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Root of the book collection to scan
    #[serde(rename = "library-dir")]
    pub library_dir: PathBuf,

    /// Directory receiving one `<isbn>.json` per identifier
    #[serde(rename = "metadata-dir")]
    pub metadata_dir: PathBuf,

    /// Directory receiving one `<isbn>.jpg` per identifier
    #[serde(rename = "covers-dir")]
    pub covers_dir: PathBuf,

    /// Append-only list of fully processed source files
    #[serde(rename = "ledger-path", default = "default_ledger_path")]
    pub ledger_path: PathBuf,
}

/// Remote catalog client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the volumes API
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// API key; takes precedence over `api-key-env`
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Maximum number of volumes requested per search
    #[serde(rename = "max-results", default = "default_max_results")]
    pub max_results: u32,

    /// Pause after every remote identifier attempt (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rewrite `http://` cover links to `https://` before downloading
    #[serde(rename = "secure-images", default = "default_secure_images")]
    pub secure_images: bool,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// File discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// File extensions to pick up, without the dot, matched case-insensitively
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Search query derivation configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryConfig {
    /// Regular expressions stripped from file names before searching
    #[serde(rename = "noise-patterns", default)]
    pub noise_patterns: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            max_results: default_max_results(),
            request_delay_ms: default_request_delay_ms(),
            timeout_secs: default_timeout_secs(),
            secure_images: default_secure_images(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("./processed.txt")
}

fn default_base_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_BOOKS_API_KEY".to_string()
}

fn default_max_results() -> u32 {
    10
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_secure_images() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("isbn-harvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string(), "epub".to_string()]
}
