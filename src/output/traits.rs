//! Output sink traits and types
//!
//! This module defines the trait interface for progress sinks and the data
//! structure describing a finished run.

use crate::state::{ItemState, RunPhase, RunState};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Status events emitted while a run progresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A source item is about to be searched
    ItemStarted {
        index: usize,
        total: usize,
        title: String,
        query: String,
    },

    /// A source item was already in the ledger
    ItemSkipped { path: PathBuf },

    /// The search returned these canonical identifiers
    IdentifiersFound { count: usize },

    /// The search failed for a non-quota reason
    SearchFailed { error: String },

    /// Metadata for this identifier is already on disk
    IdentifierSkipped { isbn: String },

    /// Metadata (and possibly a cover) was written
    IdentifierSaved { isbn: String, cover_saved: bool },

    /// The catalog had no volume for this identifier
    IdentifierNotFound { isbn: String },

    /// The identifier attempt failed for a non-quota reason
    IdentifierFailed { isbn: String, error: String },

    /// The catalog signalled quota exhaustion
    QuotaExceeded { status: u16 },

    /// A source item reached a terminal state
    ItemFinished { path: PathBuf, state: ItemState },
}

/// Summary of one finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: String,
    pub elapsed: Duration,
    pub status: RunPhase,
    pub config_hash: Option<String>,

    pub total: usize,
    pub skipped_by_ledger: usize,
    pub skipped_existing: usize,
    pub saved: usize,
    pub covers_saved: usize,
    pub not_found: usize,
    pub identifier_errors: usize,
    pub search_errors: usize,
    pub items_done: usize,
    pub items_abandoned: usize,

    /// HTTP status that stopped the run, if quota was exhausted
    pub quota_status: Option<u16>,
}

impl RunSummary {
    /// Builds a summary from the final run state
    pub fn from_state(
        state: &RunState,
        started_at: String,
        finished_at: String,
        elapsed: Duration,
        config_hash: Option<String>,
    ) -> Self {
        Self {
            started_at,
            finished_at,
            elapsed,
            status: state.phase(),
            config_hash,
            total: state.total,
            skipped_by_ledger: state.skipped_by_ledger,
            skipped_existing: state.skipped_existing,
            saved: state.saved,
            covers_saved: state.covers_saved,
            not_found: state.not_found,
            identifier_errors: state.identifier_errors,
            search_errors: state.search_errors,
            items_done: state.items_done,
            items_abandoned: state.items_abandoned,
            quota_status: state.breaker.tripped_by(),
        }
    }

    /// Returns true if the run ended on a quota signal
    pub fn quota_exhausted(&self) -> bool {
        self.quota_status.is_some()
    }

    /// Items neither skipped nor finished in this run
    pub fn items_remaining(&self) -> usize {
        self.total
            .saturating_sub(self.skipped_by_ledger)
            .saturating_sub(self.items_done)
    }
}

/// Receiver of progress events and the final summary
///
/// Purely observational: nothing a sink does feeds back into the run.
pub trait ProgressSink: Send {
    /// Records one progress event
    fn on_event(&mut self, event: ProgressEvent);

    /// Receives the final summary once the run has stopped
    fn on_summary(&mut self, summary: &RunSummary);
}
