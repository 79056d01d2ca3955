//! Pipeline deadline tracking.
//!
//! One deadline covers the whole chain of external processes. Each
//! invocation gets the time remaining; a subprocess that outlives it
//! is killed instead of hanging the run.

use std::time::{Duration, Instant};

/// Default overall budget for a run: ten minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// A wall-clock deadline shared by every subprocess in the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    expires_at: Instant,
    total: Duration,
}

impl Deadline {
    /// Start a deadline that expires `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Instant::now() + timeout,
            total: timeout,
        }
    }

    /// Time left before expiry. Zero once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has already passed.
    pub fn expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// The total budget this deadline started with.
    pub fn total(&self) -> Duration {
        self.total
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::after(DEFAULT_TIMEOUT)
    }
}
