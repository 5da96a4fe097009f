//! Configuration inspection commands
//!
//! Provides CLI interface to view the effective configuration.

use crate::settings::{Settings, WatchSection};
use anyhow::{Context, Result};
use lm_core::MergeConfig;
use owo_colors::OwoColorize;

/// Print the effective configuration (config file plus overrides)
pub async fn run_show(settings: Settings) -> Result<()> {
    println!("{}", "Effective Configuration".bold());
    match &settings.source {
        Some(path) => println!("{}: {}", "Location".dimmed(), path.display().dimmed()),
        None => println!("{}", "No config file (defaults and flags only)".dimmed()),
    }
    println!(
        "{}: {}\n",
        "Source root".dimmed(),
        settings.merge.base_dir().display().dimmed()
    );

    let merge = toml::to_string_pretty(&settings.merge).context("Failed to render configuration")?;
    println!("{}", merge);

    let watch = WatchSection {
        watch: settings.watch.clone(),
    };
    let watch = toml::to_string_pretty(&watch).context("Failed to render configuration")?;
    println!("{}", watch);

    if let Err(e) = settings.merge.validate() {
        println!("{} {}", "!".yellow(), e.to_string().yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    println!("{}", MergeConfig::example());
    println!("[watch]");
    println!("# Quiet period before a batch of changes triggers a merge");
    println!("debounce_ms = 200");
    println!("# Merge at least this often while changes keep arriving");
    println!("max_wait_ms = 2000");
    println!("# Skip paths matched by .gitignore / .lmignore in the source root");
    println!("use_gitignore = true");
    println!("use_lmignore = true");
    println!("additional_patterns = []");
    Ok(())
}
