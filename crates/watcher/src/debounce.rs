//! Debouncing of change events
//!
//! Editors and build tools touch files in bursts (write temp file, rename,
//! chmod). Every merge pass recomputes everything, so a burst only needs to
//! trigger one pass: events are collected until the source has been quiet
//! for the configured delay, then delivered as one batch with one entry per
//! path.

use crate::WatchEvent;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};

/// Default quiet period before a batch is delivered
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// Upper bound on how long a continuous stream of events can delay a batch
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(2);

/// Groups watch events into batches
pub struct Debouncer {
    rx: mpsc::Receiver<WatchEvent>,
    delay: Duration,
    max_wait: Duration,
}

impl Debouncer {
    pub fn new(rx: mpsc::Receiver<WatchEvent>, delay: Duration) -> Self {
        Self {
            rx,
            delay,
            max_wait: DEFAULT_MAX_WAIT.max(delay),
        }
    }

    /// Override the upper bound on batch latency
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait.max(self.delay);
        self
    }

    /// Wait for the next batch of events
    ///
    /// Returns `None` once the sending side is gone and every pending event
    /// has been delivered.
    pub async fn next_batch(&mut self) -> Option<Vec<WatchEvent>> {
        let first = self.rx.recv().await?;
        let deadline = Instant::now() + self.max_wait;
        let mut pending = vec![first];

        loop {
            let quiet_until = (Instant::now() + self.delay).min(deadline);
            match timeout_at(quiet_until, self.rx.recv()).await {
                Ok(Some(event)) => pending.push(event),
                // Channel closed or quiet period elapsed
                Ok(None) | Err(_) => break,
            }
        }

        Some(coalesce(pending))
    }
}

/// Collapse events to one per path, keeping the latest kind
///
/// The result is ordered by path.
pub fn coalesce(events: Vec<WatchEvent>) -> Vec<WatchEvent> {
    let mut latest: BTreeMap<PathBuf, WatchEvent> = BTreeMap::new();
    for event in events {
        latest.insert(event.path.clone(), event);
    }
    latest.into_values().collect()
}
