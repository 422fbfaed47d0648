// Poll state management.
// Tracks the poll interval, the access token, and batch progress.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tracing::info;

/// Phase of the poll loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PollPhase {
    #[default]
    Idle,
    Fetching,
}

impl PollPhase {
    pub fn display(&self) -> &'static str {
        match self {
            PollPhase::Idle => "Idle",
            PollPhase::Fetching => "Fetching",
        }
    }
}

/// Counts collected while processing one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Notifications returned by the list endpoint.
    pub fetched: usize,
    /// Desktop notifications created.
    pub shown: usize,
    /// Notifications skipped by the classifier.
    pub suppressed: usize,
    /// Notifications whose processing failed.
    pub failed: usize,
}

/// Process-wide poll state shared by the request client and the poll loop.
#[derive(Debug)]
pub struct PollState {
    interval_secs: AtomicU64,
    token: Option<String>,
    batches_in_flight: AtomicUsize,
}

impl PollState {
    pub fn new(interval: Duration, token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            interval_secs: AtomicU64::new(interval.as_secs()),
            token,
            batches_in_flight: AtomicUsize::new(0),
        }
    }

    /// Current delay between automatic checks.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.load(Ordering::Relaxed))
    }

    /// Raise the poll interval to at least `min_interval`.
    /// Returns true if the interval changed. Never shortens it.
    pub fn raise_interval(&self, min_interval: Duration) -> bool {
        let requested = min_interval.as_secs();
        let previous = self.interval_secs.fetch_max(requested, Ordering::Relaxed);
        if requested > previous {
            info!(
                old_secs = previous,
                new_secs = requested,
                "Server requested a longer poll interval"
            );
            true
        } else {
            false
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn phase(&self) -> PollPhase {
        if self.batches_in_flight.load(Ordering::Acquire) > 0 {
            PollPhase::Fetching
        } else {
            PollPhase::Idle
        }
    }

    /// Mark a batch as started. The phase stays Fetching until the guard drops.
    pub fn begin_batch(&self) -> BatchGuard<'_> {
        self.batches_in_flight.fetch_add(1, Ordering::AcqRel);
        BatchGuard { state: self }
    }
}

/// Keeps the poll phase at Fetching while alive.
pub struct BatchGuard<'a> {
    state: &'a PollState,
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.state.batches_in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
