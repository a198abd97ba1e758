use std::time::Duration;

/// Decision returned by the backoff policy after a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up; the retry budget is spent.
    NoRetry,
    /// Poll again after the given delay.
    RetryAfter(Duration),
}

/// Linear backoff with a cap and a ceiling on consecutive failures.
///
/// The delay after `n` consecutive failures is `base_delay + step * n`,
/// capped at `max_delay`. With the defaults that is `min(2 + n, 10)` seconds:
/// 3 s after the first failure, 10 s from the eighth on. The conversion
/// service sheds load in short bursts, so the growth stays gentle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Consecutive transient failures tolerated; one more aborts.
    pub max_consecutive_failures: u32,
    /// Delay before any per-failure increment.
    pub base_delay: Duration,
    /// Added once per consecutive failure.
    pub step: Duration,
    /// Upper bound on the delay.
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_consecutive_failures: 20,
            base_delay: Duration::from_secs(2),
            step: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl BackoffPolicy {
    /// Wait before the next poll after `consecutive_failures` failures in a row.
    pub fn next_delay(&self, consecutive_failures: u32) -> Duration {
        self.base_delay
            .saturating_add(self.step.saturating_mul(consecutive_failures))
            .min(self.max_delay)
    }

    /// True once `consecutive_failures` exceeds the configured ceiling.
    pub fn should_abort(&self, consecutive_failures: u32) -> bool {
        consecutive_failures > self.max_consecutive_failures
    }

    /// Combines `should_abort` and `next_delay` into a single decision.
    pub fn decide(&self, consecutive_failures: u32) -> RetryDecision {
        if self.should_abort(consecutive_failures) {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryAfter(self.next_delay(consecutive_failures))
        }
    }
}
