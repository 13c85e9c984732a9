//! Bounded retry with exponential backoff for backend write conflicts
//!
//! A conflicting write (`StoreWriteConflict`) or transient I/O failure is
//! retried a few times with short jittered delays; everything else fails
//! immediately. Conflicts are an internal concern of the recency store and
//! never reach the query engine.

use crate::errors::{Result, SearchError};
use std::time::Duration;
use tokio::time::sleep;

/// Maximum number of attempts (first try included)
const MAX_ATTEMPTS: u32 = 4;

/// Base delay for exponential backoff
const BASE_DELAY_MS: u64 = 25;

/// Delay cap
const MAX_DELAY_MS: u64 = 200;

/// Retry policy for recency store writes
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
    enable_jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryPolicy {
    /// Create a policy with default settings
    pub fn new() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay_ms: BASE_DELAY_MS,
            max_delay_ms: MAX_DELAY_MS,
            enable_jitter: true,
        }
    }

    /// Create a policy with custom attempt count and base delay
    pub fn with_config(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms: MAX_DELAY_MS,
            enable_jitter: true,
        }
    }

    /// Execute an operation, retrying transient failures
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !self.is_retryable(&e) {
                        return Err(e);
                    }

                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(e);
                    }

                    sleep(self.calculate_delay(attempt)).await;
                }
            }
        }
    }

    /// Delay before the given (1-based) retry attempt
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay_ms * 2u64.saturating_pow(attempt - 1);
        let capped = exponential.min(self.max_delay_ms);

        // ±25% jitter keeps two conflicting writers from lock-stepping
        let final_delay = if self.enable_jitter {
            let jitter = (capped / 4) as i64;
            let offset = ((rand::random::<f64>() * 2.0 - 1.0) * jitter as f64) as i64;
            ((capped as i64) + offset).max(0) as u64
        } else {
            capped
        };

        Duration::from_millis(final_delay)
    }

    fn is_retryable(&self, error: &SearchError) -> bool {
        matches!(
            error,
            SearchError::StoreWriteConflict { .. } | SearchError::Io(_)
        )
    }
}
