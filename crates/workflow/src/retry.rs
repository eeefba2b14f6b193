//! Caller-side retry of whole workflow runs.
//!
//! The orchestrator never retries a single call. Callers that want retries
//! re-run the entire sequence, and only when [`Error::is_retryable`] says
//! the API certainly created nothing. A create call that timed out or got a
//! 5xx is not re-run, since it may already have made a product.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::info;

use crate::error::Result;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
const DEFAULT_MAX_DELAY_MS: u64 = 10_000;
const DEFAULT_JITTER_FACTOR: f64 = 0.1;

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Base delay for exponential backoff (milliseconds)
    pub base_delay_ms: u64,
    /// Maximum delay between retries (milliseconds)
    pub max_delay_ms: u64,
    /// Jitter factor to add randomness (0.0 - 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            jitter_factor: DEFAULT_JITTER_FACTOR,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            max_delay_ms,
            jitter_factor: DEFAULT_JITTER_FACTOR,
        }
    }

    /// A policy that runs the operation exactly once.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, 0, 0)
    }

    /// Set the jitter factor, clamped to `[0.0, 1.0]` (NaN becomes 0).
    #[must_use]
    pub fn with_jitter(mut self, jitter_factor: f64) -> Self {
        self.jitter_factor = if jitter_factor.is_nan() {
            0.0
        } else {
            jitter_factor.clamp(0.0, 1.0)
        };
        self
    }

    /// Delay before retry number `attempt` (0-indexed).
    ///
    /// `min(base_delay * 2^attempt, max_delay)` plus up to `jitter_factor`
    /// of that again.
    #[must_use]
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponential_delay = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt));
        let capped_delay = exponential_delay.min(self.max_delay_ms);

        let factor = self.jitter_factor;
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let jitter_ms = if factor.is_finite() && factor > 0.0 && capped_delay > 0 {
            let jitter_range = (capped_delay as f64) * factor.min(1.0);
            rand::thread_rng().gen_range(0.0..jitter_range).floor() as u64
        } else {
            0
        };

        Duration::from_millis(capped_delay.saturating_add(jitter_ms))
    }
}

/// Run `operation`, re-running it on retryable failures.
///
/// # Errors
///
/// Returns the first non-retryable error, or the last error once retries
/// are exhausted.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.calculate_delay(attempt);
                attempt = attempt.saturating_add(1);
                info!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "Retrying workflow after transport failure"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
