//! Terminal formatting for the CLI layer.
//!
//! Pure display functions; all decisions about what to report happen in the
//! workflow, which hands over a finished report.

use crate::git_ops::ReleaseReport;
use crate::warnings::UpdateWarning;
use console::style;
use std::path::PathBuf;

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a non-fatal warning to stderr.
pub fn display_warning(warning: &UpdateWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print which files were rewritten to the new version.
pub fn display_changed_files(changed: &[PathBuf], new_version: &str) {
    if changed.is_empty() {
        return;
    }
    println!(
        "changed version to {} in {} file{}",
        style(new_version).green(),
        changed.len(),
        if changed.len() == 1 { "" } else { "s" }
    );
    for path in changed {
        println!("   {}", path.display());
    }
}

/// Print how far the release sequence got.
pub fn display_release_report(report: &ReleaseReport) {
    for step in &report.completed {
        display_success(&step.to_string());
    }
    if let Some((step, message)) = &report.failed {
        display_error(&format!("{} failed: {}", step, message));
    }
}
