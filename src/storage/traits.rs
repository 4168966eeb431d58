//! Storage traits and error types
//!
//! This module defines the trait interface for the local stores that hold
//! metadata records and cover images.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Write-once key/value store keyed by identifier
///
/// Existence of a key means the value was fully written. Implementations
/// must never expose a partially written value under its final key.
pub trait Store: Send + Sync {
    /// Checks whether a value exists for `key`
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Writes a text value for `key`
    fn write_text(&self, key: &str, content: &str) -> StorageResult<()>;

    /// Writes a binary value for `key`
    fn write_bytes(&self, key: &str, content: &[u8]) -> StorageResult<()>;

    /// Counts stored values
    fn count(&self) -> StorageResult<usize>;
}
