//! Bounded retry for index writes.

use std::{thread, time::Duration};

use tracing::warn;

use crate::IndexError;

/// Fixed-count, fixed-delay retry policy.
///
/// Only errors where [`IndexError::is_retryable`] holds are retried; anything
/// else is returned at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// A policy that tries once and never sleeps.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Runs `op` until it succeeds, fails fatally, or attempts run out.
    ///
    /// `label` identifies the operation in log events. On exhaustion the
    /// last error is returned.
    pub fn run<T, F>(&self, label: &str, mut op: F) -> Result<T, IndexError>
    where
        F: FnMut() -> Result<T, IndexError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() || attempt >= max_attempts => return Err(err),
                Err(err) => {
                    warn!(
                        id = label,
                        attempt,
                        max_attempts,
                        error = %err,
                        "index write failed, retrying"
                    );
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
