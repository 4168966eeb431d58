//! Completion ledger for resumable runs
//!
//! The ledger is a plain text file with one source path per line. It is only
//! ever appended to: a path lands in the file once every identifier of that
//! source item has been attempted. An interrupted run therefore leaves the
//! item it was working on out of the ledger, and the next run retries it in
//! full.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// In-memory view of the ledger file
#[derive(Debug)]
pub struct CompletionLedger {
    path: PathBuf,
    done: HashSet<String>,
}

impl CompletionLedger {
    /// Loads the ledger stored at `path`
    ///
    /// A missing file is an empty ledger. Blank lines are ignored and paths
    /// are compared case-insensitively.
    pub fn load(path: &Path) -> io::Result<Self> {
        let done = match fs::read_to_string(path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ledger_key)
                .collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(e),
        };

        tracing::debug!("Loaded {} ledger entries from {}", done.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            done,
        })
    }

    /// Returns true if `source` was fully processed in this or an earlier run
    pub fn contains(&self, source: &Path) -> bool {
        self.done.contains(&ledger_key(&source.to_string_lossy()))
    }

    /// Records `source` as fully processed
    ///
    /// The line is appended to the file before the in-memory set is updated,
    /// so a failed write never reports an item as done.
    pub fn mark_done(&mut self, source: &Path) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let line = source.to_string_lossy();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        self.done.insert(ledger_key(&line));
        Ok(())
    }

    /// Number of distinct completed paths
    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    /// Location of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ledger_key(line: &str) -> String {
    line.trim().to_lowercase()
}
