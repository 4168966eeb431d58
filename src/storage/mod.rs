//! Storage module for persisting harvested data
//!
//! Metadata records and cover images each live in their own directory, one
//! file per ISBN. A file's existence is what marks an identifier as already
//! fetched, so values are written once and never replaced.

mod fs;
mod traits;

pub use fs::FsStore;
pub use traits::{StorageError, StorageResult, Store};

use std::path::Path;

/// File extension of metadata records
pub const METADATA_EXTENSION: &str = "json";

/// File extension of cover images
pub const COVER_EXTENSION: &str = "jpg";

/// Opens the metadata record store rooted at `dir`
pub fn open_metadata_store(dir: &Path) -> StorageResult<FsStore> {
    FsStore::open(dir, METADATA_EXTENSION)
}

/// Opens the cover image store rooted at `dir`
pub fn open_cover_store(dir: &Path) -> StorageResult<FsStore> {
    FsStore::open(dir, COVER_EXTENSION)
}
