//! Compare what a merge would write against the current output

use crate::diff_utils;
use crate::settings::Settings;
use anyhow::{Context, Result};
use lm_core::Merger;
use owo_colors::OwoColorize;
use std::io;

pub async fn run(settings: Settings, context: usize) -> Result<()> {
    let merger = Merger::new(settings.merge).context("Invalid configuration")?;
    let plan = merger.plan().context("Merge failed")?;

    let mut stale = 0usize;

    for output in &plan.outputs {
        let rendered = merger.render(output)?;

        let current = match std::fs::read(&output.path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", output.path.display()))
            }
        };

        match current {
            Some(current) if current == rendered => {
                println!("{} {}", "✓".green(), output.path.display());
            }
            Some(current) => {
                stale += 1;
                println!("{} {} {}", "✗".red(), output.path.display(), "(out of date)".yellow());
                print!("{}", diff_utils::generate_unified_diff(&current, &rendered, context));
            }
            None => {
                stale += 1;
                println!("{} {} {}", "✗".red(), output.path.display(), "(missing)".yellow());
            }
        }
    }

    if stale > 0 {
        anyhow::bail!(
            "{} of {} output files are out of date (run `lmerge run`)",
            stale,
            plan.outputs.len()
        );
    }

    println!("All {} output files are up to date", plan.outputs.len());
    Ok(())
}
