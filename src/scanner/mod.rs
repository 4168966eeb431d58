//! Local file discovery
//!
//! Walks the library directory recursively and yields every file whose
//! extension is one of the configured ones. Order is whatever the filesystem
//! enumeration produces; the crawl loop never re-sorts.

use crate::HarvestError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One discovered local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    /// Absolute path of the file
    pub path: PathBuf,

    /// File name without its extension
    pub title: String,
}

impl SourceItem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, title }
    }
}

/// Lists candidate files under `root`
///
/// # Arguments
///
/// * `root` - Directory to walk recursively
/// * `extensions` - Extensions to accept, without the dot, case-insensitive
///
/// # Returns
///
/// * `Ok(Vec<SourceItem>)` - Matching files with absolute paths
/// * `Err(HarvestError)` - The root itself could not be read
pub fn list_candidate_files(root: &Path, extensions: &[String]) -> Result<Vec<SourceItem>, HarvestError> {
    let root = root.canonicalize().map_err(|e| HarvestError::Scan {
        root: root.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut items = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if has_extension(entry.path(), extensions) {
            items.push(SourceItem::new(entry.into_path()));
        }
    }

    tracing::info!("Found {} candidate files under {}", items.len(), root.display());
    Ok(items)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        vec!["pdf".to_string(), "epub".to_string()]
    }

    #[test]
    fn test_source_item_title() {
        let item = SourceItem::new("/books/Dune (Z-Library).pdf");
        assert_eq!(item.title, "Dune (Z-Library)");

        let item = SourceItem::new("/books/archive.tar.epub");
        assert_eq!(item.title, "archive.tar");
    }

    #[test]
    fn test_lists_matching_files_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sci-fi/old")).unwrap();
        fs::write(dir.path().join("Dune.pdf"), "x").unwrap();
        fs::write(dir.path().join("sci-fi/Neuromancer.EPUB"), "x").unwrap();
        fs::write(dir.path().join("sci-fi/old/Foundation.epub"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("no_extension"), "x").unwrap();

        let items = list_candidate_files(dir.path(), &default_extensions()).unwrap();
        let mut titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        titles.sort();

        assert_eq!(titles, vec!["Dune", "Foundation", "Neuromancer"]);
        assert!(items.iter().all(|i| i.path.is_absolute()));
    }

    #[test]
    fn test_directories_with_matching_names_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("folder.pdf")).unwrap();

        let items = list_candidate_files(dir.path(), &default_extensions()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let result = list_candidate_files(&dir.path().join("missing"), &default_extensions());
        assert!(matches!(result, Err(HarvestError::Scan { .. })));
    }
}
