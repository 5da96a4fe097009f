//! Watch the source root and re-merge on change

use crate::settings::Settings;
use crate::util;
use anyhow::{Context, Result};
use lm_core::Merger;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tracing::{error, info};
use watcher::{Debouncer, EventFilter, IgnoreRules, SourceWatcher};

/// Capacity of the event channel between the watcher and the debouncer
const EVENT_BUFFER: usize = 1024;

pub async fn run(settings: Settings) -> Result<()> {
    let merger = Merger::new(settings.merge).context("Invalid configuration")?;

    // Initial pass
    merge_logged(&merger);

    let root = util::absolute_path(merger.base_dir())?;
    if !root.is_dir() {
        anyhow::bail!("Source root {} is not a directory", root.display());
    }
    let dist = util::absolute_path(&merger.config().dist)?;

    let rules = IgnoreRules::load(&root, settings.watch.ignore.clone())
        .context("Failed to load ignore rules")?;
    let filter = EventFilter::new(rules).exclude(dist);

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let source_watcher = SourceWatcher::start(&root, filter, tx)?;
    let mut debouncer =
        Debouncer::new(rx, settings.watch.debounce()).with_max_wait(settings.watch.max_wait());

    println!(
        "{} {} {}",
        "Watching".bold(),
        root.display(),
        "(Ctrl-C to stop)".dimmed()
    );

    loop {
        tokio::select! {
            batch = debouncer.next_batch() => match batch {
                Some(events) => {
                    info!("{} paths changed, merging", events.len());
                    merge_logged(&merger);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watcher");
                break;
            }
        }
    }

    source_watcher.stop()
}

/// Run one pass; a failure is logged and the watcher keeps going
fn merge_logged(merger: &Merger) {
    match merger.merge() {
        Ok(report) => util::print_report(&report),
        Err(e) => error!("Merge failed: {:#}", anyhow::Error::from(e)),
    }
}
