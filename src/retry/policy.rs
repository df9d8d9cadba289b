use crate::core::DbError;
use std::time::Duration;

/// Classification of a storage failure for retry purposes
///
/// Only the two lock-contention kinds are retryable; everything else must
/// propagate to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Deadlock,
    LockTimeout,
    Unrelated,
}

impl FailureClass {
    pub fn classify(error: &DbError) -> Self {
        match error {
            DbError::Deadlock(_) => Self::Deadlock,
            DbError::LockWaitTimeout(_) => Self::LockTimeout,
            _ => Self::Unrelated,
        }
    }

    pub fn is_retryable(self) -> bool {
        !matches!(self, Self::Unrelated)
    }
}

// Pause before retry 1, 2, 3, ... in seconds. Attempts past the end of the
// table pause for the last entry rather than growing further.
const WAIT_TIMES: [u64; 7] = [0, 1, 2, 4, 8, 16, 32];

const DEFAULT_MAXIMUM_RETRIES: u32 = 3;

/// Retry budget and backoff schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy {
    /// Create the default policy: 3 retries on the fixed schedule
    pub fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAXIMUM_RETRIES,
        }
    }

    /// Set the maximum number of retries
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Configured maximum number of retries
    pub fn maximum(&self) -> u32 {
        self.max_retries
    }

    /// Whether `retries_made` retries have used up the budget
    pub fn exhausted(&self, retries_made: u32) -> bool {
        retries_made >= self.max_retries
    }

    /// Pause before the given retry attempt (1-indexed)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let index = (attempt.saturating_sub(1) as usize).min(WAIT_TIMES.len() - 1);
        Duration::from_secs(WAIT_TIMES[index])
    }
}
