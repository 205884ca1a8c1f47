//! Retry policy for control-plane requests
//!
//! Disabled by default. When a caller enables it, retryable transport
//! failures (429, 5xx, connect, timeout) are retried with exponential
//! backoff. The transport itself never retries.

use std::time::Duration;

use rand::Rng;

use crate::ports::TransportError;

const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Backoff doubles per attempt up to this exponent
const MAX_BACKOFF_EXPONENT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 = no retries)
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Whether to retry after the given (1-based) attempt failed with `error`
    pub fn should_retry(&self, attempt: u32, error: &TransportError) -> bool {
        self.is_enabled() && attempt <= self.max_retries && error.is_retryable()
    }

    /// Delay before the next attempt.
    ///
    /// `Retry-After` wins over the exponential schedule; both are capped at
    /// `max_delay`, then up to 10% jitter is added.
    pub fn backoff(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
        let scheduled = match retry_after {
            Some(secs) => Duration::from_secs(secs),
            None => self.base_delay.saturating_mul(1 << exponent),
        };
        let delay = scheduled.min(self.max_delay);

        let jitter_cap = delay.as_millis() as u64 / 10;
        if jitter_cap == 0 {
            return delay;
        }
        delay + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(status: u16) -> TransportError {
        TransportError::Status {
            status,
            reason: None,
            body: String::new(),
            retry_after: None,
        }
    }

    #[test]
    fn test_disabled_by_default() {
        let policy = RetryPolicy::default();
        assert!(!policy.is_enabled());
        assert!(!policy.should_retry(1, &server_error(503)));
    }

    #[test]
    fn test_should_retry_respects_limit() {
        let policy = RetryPolicy::with_max_retries(2);
        assert!(policy.should_retry(1, &server_error(503)));
        assert!(policy.should_retry(2, &server_error(429)));
        assert!(!policy.should_retry(3, &server_error(503)));
    }

    #[test]
    fn test_never_retries_client_errors() {
        let policy = RetryPolicy::with_max_retries(5);
        assert!(!policy.should_retry(1, &server_error(401)));
        assert!(!policy.should_retry(1, &server_error(404)));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_retries: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
        };

        let first = policy.backoff(1, None);
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(110));

        let third = policy.backoff(3, None);
        assert!(third >= Duration::from_millis(400) && third <= Duration::from_millis(440));

        let capped = policy.backoff(10, None);
        assert!(capped >= Duration::from_millis(1000) && capped <= Duration::from_millis(1100));
    }

    #[test]
    fn test_retry_after_is_honoured_and_capped() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        };
        let delay = policy.backoff(1, Some(2));
        assert!(delay >= Duration::from_secs(2) && delay <= Duration::from_millis(2200));

        let capped = policy.backoff(1, Some(120));
        assert!(capped >= Duration::from_secs(5) && capped <= Duration::from_millis(5500));
    }

    #[test]
    fn test_zero_delay_has_no_jitter() {
        let policy = RetryPolicy {
            max_retries: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        };
        assert_eq!(policy.backoff(1, None), Duration::ZERO);
    }
}
