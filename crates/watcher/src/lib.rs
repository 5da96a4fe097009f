//! File system watching for locale-merge
//!
//! This crate provides the change trigger for watch mode:
//! - Recursive watching of the fragment source root
//! - Ignore rules (VCS directories, editor temp files, .gitignore/.lmignore)
//! - Exclusion of the output directory, so writes never retrigger a pass
//! - Debouncing of event bursts into batches

pub mod debounce;
pub mod ignore;

pub use debounce::Debouncer;
pub use self::ignore::{IgnoreConfig, IgnoreRules};

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Watch mode settings (`[watch]` in the config file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period before a batch of changes triggers a merge
    pub debounce_ms: u64,

    /// Upper bound on how long a steady stream of changes can defer a merge
    pub max_wait_ms: u64,

    #[serde(flatten)]
    pub ignore: IgnoreConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: debounce::DEFAULT_DELAY.as_millis() as u64,
            max_wait_ms: debounce::DEFAULT_MAX_WAIT.as_millis() as u64,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

/// Decides which paths produce events
pub struct EventFilter {
    rules: IgnoreRules,
    /// Directories whose contents never trigger (the output directory)
    excluded: Vec<PathBuf>,
}

impl EventFilter {
    pub fn new(rules: IgnoreRules) -> Self {
        Self {
            rules,
            excluded: Vec::new(),
        }
    }

    /// Never report changes under `dir`
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    pub fn accepts(&self, path: &Path) -> bool {
        if self.excluded.iter().any(|dir| path.starts_with(dir)) {
            return false;
        }
        !self.rules.should_ignore(path)
    }
}

/// Recursive watcher over a fragment source root
///
/// Events are forwarded to the channel given at start. Dropping the watcher
/// stops watching and eventually closes the channel.
pub struct SourceWatcher {
    watcher: RecommendedWatcher,
    root: PathBuf,
}

impl SourceWatcher {
    /// Start watching `root`, sending accepted events to `tx`
    ///
    /// A full channel drops events: any event already queued triggers a
    /// complete recomputation anyway.
    pub fn start(root: &Path, filter: EventFilter, tx: mpsc::Sender<WatchEvent>) -> Result<Self> {
        let handler = move |result: notify::Result<Event>| match result {
            Ok(event) => {
                for watch_event in classify(&event) {
                    if !filter.accepts(&watch_event.path) {
                        continue;
                    }
                    debug!("Change detected: {:?} {}", watch_event.kind, watch_event.path.display());
                    if let Err(e) = tx.try_send(watch_event) {
                        debug!("Dropping change event: {}", e);
                    }
                }
            }
            Err(e) => warn!("Watch error: {}", e),
        };

        let mut watcher = RecommendedWatcher::new(handler, Config::default())
            .context("Failed to create file watcher")?;
        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;

        Ok(Self {
            watcher,
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stop watching
    pub fn stop(mut self) -> Result<()> {
        self.watcher
            .unwatch(&self.root)
            .with_context(|| format!("Failed to unwatch {}", self.root.display()))
    }
}

/// Convert a notify event into one event per affected path
///
/// Access events carry no content change and are dropped.
pub fn classify(event: &Event) -> Vec<WatchEvent> {
    let kind = match event.kind {
        notify::EventKind::Create(_) => EventKind::Create,
        notify::EventKind::Modify(ModifyKind::Name(_)) => EventKind::Rename,
        notify::EventKind::Modify(_) => EventKind::Modify,
        notify::EventKind::Remove(_) => EventKind::Delete,
        notify::EventKind::Any | notify::EventKind::Other => EventKind::Modify,
        notify::EventKind::Access(_) => return Vec::new(),
    };

    event
        .paths
        .iter()
        .map(|path| WatchEvent {
            path: path.clone(),
            kind,
        })
        .collect()
}

/// File system event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// Path that changed
    pub path: PathBuf,
    /// Type of change
    pub kind: EventKind,
}

/// Type of file system event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// File created
    Create,
    /// File modified
    Modify,
    /// File deleted
    Delete,
    /// File renamed
    Rename,
}
