//! Fixed-delay retry wrapper for fallible async operations
//!
//! A [`RetryPolicy`] owns one single-argument operation and retries it when
//! it fails with the configured [`ErrorKind`]. The attempt budget is scoped
//! to each call: every `invoke` starts with the full `max_retries` budget.
//!
//! | Outcome of an attempt      | Action                                   |
//! |----------------------------|------------------------------------------|
//! | `Ok`                       | Return the value                         |
//! | Error of the retried kind  | Sleep `delay`, spend one attempt, retry  |
//! | Budget spent               | `RetryExhausted`                         |
//! | Any other error            | Return it immediately                    |

use crate::config::validate_retry_bounds;
use crate::{ConfigError, ErrorKind, KvartalError};
use std::future::Future;
use std::time::Duration;

/// Retry wrapper around a single-argument async operation
#[derive(Debug, Clone)]
pub struct RetryPolicy<F> {
    operation: F,
    delay: Duration,
    retry_on: ErrorKind,
    max_retries: u32,
}

impl<F> RetryPolicy<F> {
    /// Creates a policy, rejecting out-of-range settings up front
    ///
    /// # Arguments
    ///
    /// * `operation` - The wrapped operation
    /// * `delay_secs` - Pause between attempts, within [0.1, 5.0]
    /// * `retry_on` - The only error kind that triggers a retry
    /// * `max_retries` - Attempts per call, within [0, 10]
    ///
    /// # Returns
    ///
    /// * `Ok(RetryPolicy)` - Valid policy
    /// * `Err(ConfigError::Validation)` - Delay or budget out of range
    pub fn new(
        operation: F,
        delay_secs: f64,
        retry_on: ErrorKind,
        max_retries: u32,
    ) -> Result<Self, ConfigError> {
        validate_retry_bounds(delay_secs, max_retries)?;

        Ok(Self {
            operation,
            delay: Duration::from_secs_f64(delay_secs),
            retry_on,
            max_retries,
        })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn retry_on(&self) -> ErrorKind {
        self.retry_on
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Runs the operation, retrying errors of the configured kind
    ///
    /// # Returns
    ///
    /// * `Ok(O)` - An attempt succeeded
    /// * `Err(KvartalError::RetryExhausted)` - Every attempt failed with the
    ///   retried kind, or the budget is zero
    /// * `Err(e)` - An attempt failed with any other error
    pub async fn try_invoke<I, O, Fut>(&self, input: I) -> Result<O, KvartalError>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<O, KvartalError>>,
        I: Clone,
    {
        if self.max_retries == 0 {
            return Err(KvartalError::RetryExhausted {
                attempts: 0,
                last_error: "retry budget is zero".to_string(),
            });
        }

        let mut attempts = 0;
        loop {
            attempts += 1;
            match (self.operation)(input.clone()).await {
                Ok(output) => {
                    if attempts > 1 {
                        tracing::info!(attempts, "Operation succeeded after retry");
                    }
                    return Ok(output);
                }
                Err(e) if e.kind() == self.retry_on => {
                    if attempts >= self.max_retries {
                        return Err(KvartalError::RetryExhausted {
                            attempts,
                            last_error: e.to_string(),
                        });
                    }

                    tracing::warn!(
                        error = %e,
                        attempt = attempts,
                        max_retries = self.max_retries,
                        delay_ms = self.delay.as_millis() as u64,
                        "Operation failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Runs the operation and reports failures instead of returning them
    ///
    /// Exhaustion and unexpected errors are logged and turned into `None`;
    /// callers treat `None` as a normal outcome.
    pub async fn invoke<I, O, Fut>(&self, input: I) -> Option<O>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<O, KvartalError>>,
        I: Clone,
    {
        match self.try_invoke(input).await {
            Ok(output) => Some(output),
            Err(e @ KvartalError::RetryExhausted { .. }) => {
                tracing::error!(error = %e, "Operation failed after all retry attempts exhausted");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, kind = ?e.kind(), "Operation failed with non-retryable error");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn connection_failure() -> KvartalError {
        KvartalError::ConnectionFailure {
            url: "http://test".to_string(),
            message: "connection refused".to_string(),
        }
    }

    /// Operation that fails `failures` times, then echoes its input
    fn flaky(
        failures: u32,
        calls: Arc<AtomicU32>,
    ) -> impl Fn(u32) -> std::future::Ready<Result<u32, KvartalError>> {
        move |input| {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            if call < failures {
                std::future::ready(Err(connection_failure()))
            } else {
                std::future::ready(Ok(input))
            }
        }
    }

    #[test]
    fn test_rejects_out_of_range_settings() {
        let op = |x: u32| async move { Ok::<_, KvartalError>(x) };

        assert!(RetryPolicy::new(op, 0.05, ErrorKind::ConnectionFailure, 3).is_err());
        assert!(RetryPolicy::new(op, 5.1, ErrorKind::ConnectionFailure, 3).is_err());
        assert!(matches!(
            RetryPolicy::new(op, 1.0, ErrorKind::ConnectionFailure, 11),
            Err(ConfigError::Validation(_))
        ));

        let policy = RetryPolicy::new(op, 1.5, ErrorKind::ConnectionFailure, 5).unwrap();
        assert_eq!(policy.delay(), Duration::from_millis(1500));
        assert_eq!(policy.max_retries(), 5);
        assert_eq!(policy.retry_on(), ErrorKind::ConnectionFailure);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy =
            RetryPolicy::new(flaky(2, calls.clone()), 0.1, ErrorKind::ConnectionFailure, 5).unwrap();

        assert_eq!(policy.invoke(7).await, Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy =
            RetryPolicy::new(flaky(u32::MAX, calls.clone()), 0.1, ErrorKind::ConnectionFailure, 3)
                .unwrap();

        let result = policy.try_invoke(1).await;
        assert!(matches!(
            result,
            Err(KvartalError::RetryExhausted { attempts: 3, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        assert_eq!(policy.invoke(1).await, None);
    }

    #[tokio::test]
    async fn test_budget_is_per_call() {
        let calls = Arc::new(AtomicU32::new(0));
        // Fails the first three calls overall, then succeeds
        let policy =
            RetryPolicy::new(flaky(3, calls.clone()), 0.1, ErrorKind::ConnectionFailure, 3).unwrap();

        assert_eq!(policy.invoke(1).await, None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        // A fresh call gets the full budget back
        assert_eq!(policy.invoke(2).await, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_zero_budget_never_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy =
            RetryPolicy::new(flaky(0, calls.clone()), 0.1, ErrorKind::ConnectionFailure, 0).unwrap();

        assert!(matches!(
            policy.try_invoke(1).await,
            Err(KvartalError::RetryExhausted { attempts: 0, .. })
        ));
        assert_eq!(policy.invoke(1).await, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_other_error_kinds_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let policy = RetryPolicy::new(
            move |_: u32| {
                counter.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Err::<u32, _>(KvartalError::HttpStatus {
                    url: "http://test".to_string(),
                    status: 404,
                }))
            },
            0.1,
            ErrorKind::ConnectionFailure,
            5,
        )
        .unwrap();

        assert!(matches!(
            policy.try_invoke(1).await,
            Err(KvartalError::HttpStatus { status: 404, .. })
        ));
        assert_eq!(policy.invoke(1).await, None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
