//! Console progress output

use crate::output::traits::{ProgressEvent, ProgressSink, RunSummary};
use crate::state::ItemState;

/// Prints one status line per event and a summary block at the end
#[derive(Debug, Default)]
pub struct ConsoleSink {
    quiet: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses per-item lines; the summary is still printed
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl ProgressSink for ConsoleSink {
    fn on_event(&mut self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        match event {
            ProgressEvent::ItemStarted {
                index,
                total,
                title,
                query,
            } => {
                println!("[{}/{}] {}", index + 1, total, title);
                if query != title {
                    println!("  query: {:?}", query);
                }
            }
            ProgressEvent::ItemSkipped { path } => {
                println!("  skip (done earlier): {}", path.display());
            }
            ProgressEvent::IdentifiersFound { count } => {
                println!("  found {} ISBN(s)", count);
            }
            ProgressEvent::SearchFailed { error } => {
                println!("  search error: {}", error);
            }
            ProgressEvent::IdentifierSkipped { isbn } => {
                println!("  {} skip (already saved)", isbn);
            }
            ProgressEvent::IdentifierSaved { isbn, cover_saved } => {
                if cover_saved {
                    println!("  {} saved (with cover)", isbn);
                } else {
                    println!("  {} saved", isbn);
                }
            }
            ProgressEvent::IdentifierNotFound { isbn } => {
                println!("  {} not found", isbn);
            }
            ProgressEvent::IdentifierFailed { isbn, error } => {
                println!("  {} error: {}", isbn, error);
            }
            ProgressEvent::QuotaExceeded { status } => {
                println!("  quota exceeded (HTTP {}), stopping", status);
            }
            ProgressEvent::ItemFinished { state, .. } => {
                if state == ItemState::Abandoned {
                    println!("  left for next run");
                }
            }
        }
    }

    fn on_summary(&mut self, summary: &RunSummary) {
        println!();
        println!("=== Harvest Summary ===");
        println!("  Status: {}", summary.status);
        println!("  Elapsed: {:.1}s", summary.elapsed.as_secs_f64());
        println!("  Files found: {}", summary.total);
        println!("  Skipped (done earlier): {}", summary.skipped_by_ledger);
        println!("  Files completed: {}", summary.items_done);
        println!("  Metadata saved: {}", summary.saved);
        println!("  Covers saved: {}", summary.covers_saved);
        println!("  ISBNs already on disk: {}", summary.skipped_existing);
        println!("  ISBNs not found: {}", summary.not_found);
        println!("  ISBN errors: {}", summary.identifier_errors);
        println!("  Search errors: {}", summary.search_errors);

        if let Some(status) = summary.quota_status {
            println!();
            println!(
                "!! Stopped early: catalog quota exhausted (HTTP {}).",
                status
            );
            println!(
                "!! {} file(s) left for the next run.",
                summary.items_remaining()
            );
        }
    }
}
