//! Filesystem storage implementation
//!
//! Each key maps to `<root>/<key>.<extension>`. Writes go to a temporary
//! sibling first and are renamed into place.

use crate::storage::traits::{StorageError, StorageResult, Store};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory-backed store with a fixed file extension
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    extension: String,
}

impl FsStore {
    /// Opens a store rooted at `root`, creating the directory if needed
    ///
    /// # Arguments
    ///
    /// * `root` - Directory holding one file per key
    /// * `extension` - Extension appended to every key, without the dot
    pub fn open(root: &Path, extension: &str) -> StorageResult<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    /// Path a key is stored under
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, self.extension)))
    }

    fn write_atomic(&self, key: &str, content: &[u8]) -> StorageResult<()> {
        let target = self.path_for(key)?;
        let staging = self.root.join(format!(".{}.{}.part", key, self.extension));

        fs::write(&staging, content)?;
        if let Err(e) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        tracing::trace!("Wrote {} bytes to {}", content.len(), target.display());
        Ok(())
    }
}

impl Store for FsStore {
    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.path_for(key)?.is_file())
    }

    fn write_text(&self, key: &str, content: &str) -> StorageResult<()> {
        self.write_atomic(key, content.as_bytes())
    }

    fn write_bytes(&self, key: &str, content: &[u8]) -> StorageResult<()> {
        self.write_atomic(key, content)
    }

    fn count(&self) -> StorageResult<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let hidden = path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true);
            let matches = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case(&self.extension))
                .unwrap_or(false);
            if !hidden && matches && path.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Keys become file names, so anything that could escape the root is refused
fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
