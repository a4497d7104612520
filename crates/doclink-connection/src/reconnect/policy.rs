//! Retry policy and backoff delay calculation

use std::time::Duration;

use doclink_core::RetryOverrides;

/// Bounded exponential-backoff retry policy.
///
/// The wait after failed attempt `k` (1-indexed) is
/// `base_interval * backoff_factor^(k - 1)`. There is no jitter and no cap,
/// so delays are fully determined by the attempt number.
///
/// # Example
///
/// ```
/// use doclink_connection::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, 100, 2.0);
///
/// assert_eq!(policy.delay_before_retry(1), Duration::from_millis(100));
/// assert_eq!(policy.delay_before_retry(2), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first (at least 1)
    max_attempts: u32,
    /// Wait in milliseconds after the first failed attempt
    base_interval_ms: u64,
    /// Growth factor between consecutive waits (at least 1.0)
    backoff_factor: f64,
}

impl RetryPolicy {
    /// Create a new retry policy.
    ///
    /// `max_attempts` is raised to 1 and `backoff_factor` to 1.0 if given
    /// smaller values.
    pub fn new(max_attempts: u32, base_interval_ms: u64, backoff_factor: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_interval_ms,
            backoff_factor: backoff_factor.max(1.0),
        }
    }

    /// Build a policy from caller overrides, using the defaults for any
    /// field left unset.
    pub fn merged(overrides: Option<&RetryOverrides>) -> Self {
        let defaults = Self::default();
        let Some(overrides) = overrides else {
            return defaults;
        };

        Self::new(
            overrides.max_attempts.unwrap_or(defaults.max_attempts),
            overrides.base_interval_ms.unwrap_or(defaults.base_interval_ms),
            overrides.backoff_factor.unwrap_or(defaults.backoff_factor),
        )
    }

    /// Wait before retrying after the given failed attempt (1-indexed).
    ///
    /// Attempt 1 waits the base interval unscaled.
    pub fn delay_before_retry(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let delay_ms = (self.base_interval_ms as f64) * self.backoff_factor.powi(exponent);
        Duration::from_millis(delay_ms as u64)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }
}

impl Default for RetryPolicy {
    /// Default policy: 5 attempts, 5 second base interval, 1.5x factor
    fn default() -> Self {
        Self::new(5, 5_000, 1.5)
    }
}
