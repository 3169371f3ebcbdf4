//! Retry policy per remote error kind

use std::time::Duration;

use crate::error::ApiErrorKind;

/// How the wait between attempts grows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay every time
    Fixed,
    /// delay * 2^attempt (5s, 10s, 20s, ...)
    Exponential,
}

/// Longest single wait, whatever the backoff
pub const MAX_DELAY: Duration = Duration::from_secs(300);

/// Bounded retry budget shared by a whole run, plus the base delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
    /// Cap on any single wait
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(5),
            max_delay: MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Backoff strategy for an error kind, `None` if it must not be retried.
    pub const fn backoff(kind: ApiErrorKind) -> Option<Backoff> {
        match kind {
            ApiErrorKind::Transient => Some(Backoff::Fixed),
            ApiErrorKind::RateLimited => Some(Backoff::Exponential),
            ApiErrorKind::QuotaExceeded | ApiErrorKind::Fatal => None,
        }
    }

    /// Delay before the next attempt, given how many retries were already used.
    ///
    /// Returns `None` when the kind is not retryable or the budget is spent.
    pub fn next_delay(&self, kind: ApiErrorKind, used: u32) -> Option<Duration> {
        if used >= self.max_retries {
            return None;
        }
        let delay = match Self::backoff(kind)? {
            Backoff::Fixed => Some(self.delay),
            Backoff::Exponential => 2u32
                .checked_pow(used)
                .and_then(|factor| self.delay.checked_mul(factor)),
        };
        Some(delay.unwrap_or(self.max_delay).min(self.max_delay))
    }
}
