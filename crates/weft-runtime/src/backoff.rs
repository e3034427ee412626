//! Retry backoff
//!
//! Exponential delay schedule shared by template loading and controller
//! readiness polling.

use std::time::Duration;

/// Exponential backoff schedule. Yields the delay to wait before each retry.
#[derive(Debug, Clone)]
pub struct Backoff {
    next_ms: f64,
    multiplier: f64,
    remaining: Option<u32>,
}

impl Backoff {
    pub fn new(initial_ms: f64, multiplier: f64) -> Self {
        Self {
            next_ms: initial_ms,
            multiplier,
            remaining: None,
        }
    }

    /// Stop after `retries` delays
    pub fn with_limit(mut self, retries: u32) -> Self {
        self.remaining = Some(retries);
        self
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let delay = Duration::from_micros((self.next_ms * 1000.0).round() as u64);
        self.next_ms *= self.multiplier;
        Some(delay)
    }
}

/// Milliseconds, for log lines
pub(crate) fn millis(delay: Duration) -> f64 {
    delay.as_secs_f64() * 1000.0
}
