use std::time::Duration;

use rand::Rng;

/// Retry budget for the remote invocation call.
///
/// Only transport failures are retried; anything the remote function
/// actually answered is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            // 1 initial + 2 retries
            max_attempts: 3,
            backoff_base: Duration::from_millis(200),
            backoff_cap: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn without_backoff(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base: Duration::ZERO,
            backoff_cap: Duration::ZERO,
        }
    }

    /// `attempt` is 1-based: the backoff to wait after that attempt failed.
    pub fn compute_backoff<R: Rng>(&self, attempt: u32, rng: &mut R) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let factor = 1u64.checked_shl(exp).unwrap_or(u64::MAX);
        let ms = (self.backoff_base.as_millis() as u64).saturating_mul(factor);
        let capped = ms.min(self.backoff_cap.as_millis() as u64);

        // full jitter
        Duration::from_millis(rng.gen_range(0..=capped))
    }
}
