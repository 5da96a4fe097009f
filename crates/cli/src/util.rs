//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use lm_core::MergeReport;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Print a merge report, one line per written file
pub fn print_report(report: &MergeReport) {
    for output in &report.outputs {
        let mode = if output.reconciled { "reconciled" } else { "merged" };
        let untranslated = if output.untranslated > 0 {
            format!("{} untranslated", output.untranslated).yellow().to_string()
        } else {
            String::new()
        };

        println!(
            "{} {} {} {} {}",
            "✓".green(),
            output.path.display(),
            mode.cyan(),
            format!("({} keys)", output.keys).dimmed(),
            untranslated
        );
    }

    println!(
        "{} {} fragments into {} files",
        "Merged".bold(),
        report.fragments,
        report.outputs.len()
    );
}

/// Make `path` absolute against the working directory
///
/// Existing paths are canonicalized so they compare equal to the paths the
/// file watcher reports.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let cwd = cwd.canonicalize().unwrap_or(cwd);
    Ok(cwd.join(path))
}
