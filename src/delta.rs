// Cumulative counter deltas (network bytes, disk I/O totals)

use std::time::{Duration, Instant};
use tracing::debug;

/// A pair of cumulative byte counters as read from the OS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteCounts {
    pub received: u64,
    pub sent: u64,
}

impl ByteCounts {
    pub fn new(received: u64, sent: u64) -> Self {
        Self { received, sent }
    }
}

/// Bytes moved between two observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteDelta {
    pub received: u64,
    pub sent: u64,
    pub elapsed: Duration,
}

impl ByteDelta {
    pub fn is_zero(&self) -> bool {
        self.received == 0 && self.sent == 0
    }

    pub fn received_per_sec(&self) -> f64 {
        per_sec(self.received, self.elapsed)
    }

    pub fn sent_per_sec(&self) -> f64 {
        per_sec(self.sent, self.elapsed)
    }
}

fn per_sec(bytes: u64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    bytes as f64 / elapsed.as_secs_f64()
}

/// Diffs cumulative counters against the previous observation.
///
/// The first observation after construction or [`DeltaTracker::reset`] only
/// establishes the baseline and reports zero, so a fresh tracker never shows a
/// spike equal to the counter's lifetime total.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    previous: ByteCounts,
    previous_at: Option<Instant>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a baseline exists and the next delta can be trusted.
    pub fn is_warm(&self) -> bool {
        self.previous_at.is_some()
    }

    /// Drop the baseline; the next observation is a warm-up again.
    pub fn reset(&mut self) {
        self.previous_at = None;
    }

    pub fn compute_delta(&mut self, current: ByteCounts, now: Instant) -> ByteDelta {
        let Some(previous_at) = self.previous_at else {
            self.rebase(current, now);
            return ByteDelta::default();
        };

        if current.received < self.previous.received || current.sent < self.previous.sent {
            // Wraparound or adapter reset; treat like a fresh baseline.
            debug!(
                previous_received = self.previous.received,
                previous_sent = self.previous.sent,
                current_received = current.received,
                current_sent = current.sent,
                "cumulative counter went backwards, re-baselining"
            );
            self.rebase(current, now);
            return ByteDelta::default();
        }

        let delta = ByteDelta {
            received: current.received - self.previous.received,
            sent: current.sent - self.previous.sent,
            elapsed: now.saturating_duration_since(previous_at),
        };
        self.rebase(current, now);
        delta
    }

    fn rebase(&mut self, current: ByteCounts, now: Instant) {
        self.previous = current;
        self.previous_at = Some(now);
    }
}
