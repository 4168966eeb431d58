//! Output module for progress reporting and run summaries
//!
//! This module handles:
//! - Progress events emitted during a run and the sinks that receive them
//! - The final run summary, on the console and as markdown
//! - Statistics about what earlier runs stored on disk

mod console;
mod markdown;
pub mod stats;
mod traits;

pub use console::ConsoleSink;
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{load_statistics, print_statistics, HarvestStatistics};
pub use traits::{OutputError, OutputResult, ProgressEvent, ProgressSink, RunSummary};
