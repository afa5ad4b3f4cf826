//! Time-related utilities with clock abstraction for testability.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use chrono::DateTime;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Milliseconds elapsed on a monotonic timeline
    fn now_millis(&self) -> u64;
}

/// Monotonic clock implementation (uses `Instant`, counts from creation)
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Manually driven clock for testing (only moves when told to)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a new manual clock starting at the given time
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: AtomicU64::new(start_millis),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Format an RFC 3339 timestamp as `YYYY-MM-DD` in its own offset.
///
/// Returns `None` when the input is not a valid RFC 3339 timestamp.
pub fn format_publish_date(rfc3339: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(rfc3339)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}
