//! Utilities for generating line-by-line diffs of output files

use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};

/// Generate a unified diff with colored output
///
/// Returns a formatted string with colored diff hunks showing additions (+) and deletions (-)
pub fn generate_unified_diff(old_content: &[u8], new_content: &[u8], context_lines: usize) -> String {
    // Convert bytes to UTF-8 (with replacement chars for invalid UTF-8)
    let old_text = String::from_utf8_lossy(old_content);
    let new_text = String::from_utf8_lossy(new_content);

    let diff = TextDiff::from_lines(&old_text, &new_text);

    let mut output = String::new();

    for (hunk_idx, hunk) in diff
        .unified_diff()
        .context_radius(context_lines)
        .iter_hunks()
        .enumerate()
    {
        if hunk_idx > 0 {
            output.push('\n');
        }

        // Hunk header (e.g., @@ -12,7 +12,8 @@)
        let header = format!("{}", hunk.header());
        output.push_str(&format!("    {}\n", header.cyan()));

        for change in hunk.iter_changes() {
            let line: &str = change.value();

            match change.tag() {
                ChangeTag::Delete => {
                    output.push_str(&format!("    {}", format!("-{}", line).red()));
                }
                ChangeTag::Insert => {
                    output.push_str(&format!("    {}", format!("+{}", line).green()));
                }
                ChangeTag::Equal => {
                    output.push_str(&format!("    {}", format!(" {}", line).dimmed()));
                }
            }

            // Output files have no trailing newline on the last line
            if !line.ends_with('\n') {
                output.push('\n');
            }
        }
    }

    output
}
