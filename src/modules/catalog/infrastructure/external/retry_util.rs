use crate::shared::errors::StoreError;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration for remote store calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Fixed-step backoff (500ms, 1s, 1.5s, ...) used for startup checks
    pub fn linear(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

/// Retry utility with backoff
pub struct RetryUtil;

impl RetryUtil {
    /// Execute an operation, retrying retryable `StoreError`s
    pub async fn with_retry<F, Fut, T>(
        operation: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> Result<T, StoreError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, StoreError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(
                            "{} succeeded on attempt {} after {} retries",
                            operation_name,
                            attempt + 1,
                            attempt
                        );
                    }
                    return Ok(result);
                }
                Err(error) if !error.is_retryable() => {
                    debug!(
                        "{} failed with non-retryable error: {}",
                        operation_name, error
                    );
                    return Err(error);
                }
                Err(error) if attempt >= config.max_retries => {
                    warn!(
                        "{} failed on final attempt {} ({}), giving up",
                        operation_name,
                        attempt + 1,
                        error
                    );
                    return Err(error);
                }
                Err(error) => {
                    let delay = Self::calculate_delay(attempt, config);
                    warn!(
                        "{} failed on attempt {} ({}), retrying in {:?}",
                        operation_name,
                        attempt + 1,
                        error,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Delay before retry number `attempt + 1`
    pub fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
        let millis = if config.backoff_multiplier <= 1.0 {
            // Linear: base * (attempt + 1)
            config.base_delay.as_millis() as f64 * (attempt + 1) as f64
        } else {
            config.base_delay.as_millis() as f64 * config.backoff_multiplier.powi(attempt as i32)
        };

        let mut delay = Duration::from_millis(millis as u64).min(config.max_delay);

        // Add jitter to prevent thundering herd
        if config.jitter {
            let jitter_ms = (delay.as_millis() as f64 * 0.1 * rand::random::<f64>()) as u64;
            delay += Duration::from_millis(jitter_ms);
        }

        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn linear_delays_step_by_base() {
        let config = RetryConfig::linear(3);
        assert_eq!(RetryUtil::calculate_delay(0, &config), Duration::from_millis(500));
        assert_eq!(RetryUtil::calculate_delay(1, &config), Duration::from_millis(1000));
        assert_eq!(RetryUtil::calculate_delay(2, &config), Duration::from_millis(1500));
    }

    #[test]
    fn exponential_delays_are_capped() {
        let config = RetryConfig {
            jitter: false,
            max_delay: Duration::from_secs(2),
            ..RetryConfig::default()
        };
        assert_eq!(RetryUtil::calculate_delay(1, &config), Duration::from_secs(1));
        assert_eq!(RetryUtil::calculate_delay(5, &config), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_errors_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = RetryUtil::with_retry(
            move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(StoreError::Transport("connection reset".into()))
                } else {
                    Ok(7)
                }
            },
            &RetryConfig::linear(3),
            "test op",
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_non_retryable_error() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryUtil::with_retry(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(StoreError::Status {
                    status: 401,
                    body: "bad key".into(),
                })
            },
            &RetryConfig::linear(3),
            "test op",
        )
        .await;

        assert!(matches!(result, Err(StoreError::Status { status: 401, .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = RetryUtil::with_retry(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(StoreError::Transport("down".into()))
            },
            &RetryConfig::linear(2),
            "test op",
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
