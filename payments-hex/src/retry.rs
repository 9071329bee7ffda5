//! Retry executor shared by every processor variant.
//!
//! Only `RetryableFailure` outcomes are re-attempted. A permanent failure
//! is returned after the attempt that produced it, and running out of
//! attempts turns the last transient failure into
//! [`PaymentError::RetryExhausted`].

use std::time::Duration;

use payments_types::{PaymentError, PaymentResult, PaymentStatus};
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

/// Default number of attempts per dispatch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay between consecutive attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Waits the same duration after every failed attempt
    Fixed(Duration),
    /// Doubles the wait after every failed attempt, starting at `base`
    /// and never exceeding `max`
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Returns the delay to wait after the given (1-based) failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, max } => {
                let factor = 1u32
                    .checked_shl(attempt.saturating_sub(1))
                    .unwrap_or(u32::MAX);
                base.checked_mul(factor).unwrap_or(max).min(max)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(2),
        }
    }
}

/// How many times, and how patiently, a payment is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
    attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RetryPolicy {
    /// Creates a policy with the default backoff and no attempt timeout.
    ///
    /// `max_attempts` is clamped to at least one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::default(),
            attempt_timeout: None,
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Bounds each individual attempt; an attempt that runs over is
    /// treated as a retryable failure.
    pub fn with_attempt_timeout(mut self, limit: Duration) -> Self {
        self.attempt_timeout = Some(limit);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }
}

/// Runs `attempt` until it produces a non-retryable outcome or the policy's
/// attempts are used up.
///
/// The closure receives the 1-based attempt number. One log event is
/// emitted per attempt.
pub async fn with_retry<F, Fut>(
    mut attempt: F,
    policy: &RetryPolicy,
) -> Result<PaymentResult, PaymentError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = PaymentResult>,
{
    let max_attempts = policy.max_attempts();
    let mut current = 1;

    loop {
        let result = match policy.attempt_timeout() {
            Some(limit) => match timeout(limit, attempt(current)).await {
                Ok(result) => result,
                Err(_) => {
                    PaymentResult::retryable(format!("attempt timed out after {limit:?}"))
                }
            },
            None => attempt(current).await,
        };

        match result.status() {
            PaymentStatus::Succeeded => {
                info!(
                    attempt = current,
                    max_attempts,
                    status = %result.status(),
                    provider_reference = result.provider_reference().unwrap_or_default(),
                    "payment attempt succeeded"
                );
                return Ok(result);
            }
            PaymentStatus::Failed => {
                warn!(
                    attempt = current,
                    max_attempts,
                    status = %result.status(),
                    error = result.error_detail().unwrap_or_default(),
                    "payment attempt failed permanently"
                );
                return Ok(result);
            }
            PaymentStatus::RetryableFailure => {
                warn!(
                    attempt = current,
                    max_attempts,
                    status = %result.status(),
                    error = result.error_detail().unwrap_or_default(),
                    "payment attempt failed transiently"
                );
                if current >= max_attempts {
                    return Err(PaymentError::RetryExhausted {
                        attempts: current,
                        last: result,
                    });
                }
            }
        }

        sleep(policy.backoff().delay_after(current)).await;
        current += 1;
    }
}
