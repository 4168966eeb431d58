//! Markdown summary generation
//!
//! This module writes a human-readable markdown report of a finished run.

use crate::output::traits::{OutputResult, RunSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary to `output_path`
///
/// # Arguments
///
/// * `summary` - The run summary
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &RunSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run summary as markdown
pub fn format_markdown_summary(summary: &RunSummary) -> String {
    let mut md = String::new();

    md.push_str("# ISBN Harvest Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        summary.elapsed.as_secs_f64()
    ));
    md.push_str(&format!("- **Status**: {}\n", summary.status));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    if let Some(status) = summary.quota_status {
        md.push_str(&format!(
            "> **Quota exhausted** (HTTP {}). {} file(s) were left for the next run.\n\n",
            status,
            summary.items_remaining()
        ));
    }

    // Files
    md.push_str("## Files\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Found | {} |\n", summary.total));
    md.push_str(&format!("| Done earlier | {} |\n", summary.skipped_by_ledger));
    md.push_str(&format!("| Completed | {} |\n", summary.items_done));
    md.push_str(&format!("| Left for next run | {} |\n", summary.items_remaining()));
    md.push_str(&format!("| Search errors | {} |\n\n", summary.search_errors));

    // Identifiers
    md.push_str("## ISBNs\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Metadata saved | {} |\n", summary.saved));
    md.push_str(&format!("| Covers saved | {} |\n", summary.covers_saved));
    md.push_str(&format!("| Already on disk | {} |\n", summary.skipped_existing));
    md.push_str(&format!("| Not found | {} |\n", summary.not_found));
    md.push_str(&format!("| Errors | {} |\n", summary.identifier_errors));

    md
}
