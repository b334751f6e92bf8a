//! Fixed-interval polling with a wall-clock deadline.

use std::time::{Duration, Instant};

use crate::error::{Result, UcareError};

/// Delay between two polling attempts.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether a mutating call should block until the server reflects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Poll until the awaited state is observed
    pub wait: bool,
    /// Give up after this long (only used when `wait` is set)
    pub timeout: Duration,
}

impl WaitOptions {
    /// Wait with the default timeout.
    pub fn wait() -> Self {
        Self {
            wait: true,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            wait: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A deadline measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    timeout: Duration,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Self {
            started: Instant::now(),
            timeout,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.started.elapsed() > self.timeout
    }

    /// Fail with [`UcareError::Timeout`] once the deadline has passed.
    pub fn check(&self, message: &str) -> Result<()> {
        if self.is_expired() {
            return Err(UcareError::Timeout(message.to_string()));
        }
        Ok(())
    }

    /// Sleep for one polling interval.
    pub fn pause(&self) {
        std::thread::sleep(POLL_INTERVAL);
    }
}
