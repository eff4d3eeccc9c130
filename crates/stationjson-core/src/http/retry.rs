//! Retry logic with exponential backoff for HTTP requests
//!
//! Only transient failures (server, network, rate limit) are retried.

use crate::http::error::{ErrorClassification, HttpError};
use backoff::{backoff::Backoff, ExponentialBackoff};
use std::time::Duration;
use tracing::{error, warn};

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of requests sent, the first one included
    /// (0 and 1 both mean a single request)
    pub max_attempts: u32,
    /// Base delay for exponential backoff (in seconds)
    pub base_delay_secs: u64,
    /// Maximum delay between retries (in seconds)
    pub max_delay_secs: u64,
    /// Whether to add jitter to prevent thundering herd
    pub jitter: bool,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 1,
            max_delay_secs: 30,
            jitter: true,
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy allowing at most `max_attempts` requests in total
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// A policy that never retries
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Set the base delay
    pub fn with_base_delay(mut self, seconds: u64) -> Self {
        self.base_delay_secs = seconds;
        self
    }

    /// Set the maximum delay
    pub fn with_max_delay(mut self, seconds: u64) -> Self {
        self.max_delay_secs = seconds;
        self
    }

    /// Enable or disable jitter
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Create an exponential backoff instance
    pub fn create_backoff(&self) -> ExponentialBackoff {
        let mut backoff = ExponentialBackoff {
            initial_interval: Duration::from_secs(self.base_delay_secs),
            current_interval: Duration::from_secs(self.base_delay_secs),
            max_interval: Duration::from_secs(self.max_delay_secs),
            multiplier: self.multiplier,
            max_elapsed_time: None, // attempts are capped separately
            ..Default::default()
        };

        if !self.jitter {
            backoff.randomization_factor = 0.0;
        }

        backoff
    }
}

/// Decision on whether to retry a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the request after the specified delay
    Retry { delay: Duration },
    /// Do not retry the request
    NoRetry,
}

/// Tracks attempts and delays for one logical request
#[derive(Debug)]
pub struct RetryHandler {
    policy: RetryPolicy,
    attempts: u32,
    backoff: ExponentialBackoff,
}

impl RetryHandler {
    /// Create a new retry handler with the given policy
    pub fn new(policy: RetryPolicy) -> Self {
        let backoff = policy.create_backoff();
        Self {
            policy,
            attempts: 0,
            backoff,
        }
    }

    /// Determine if a request should be retried based on the error
    pub fn should_retry(&mut self, error: &HttpError) -> RetryDecision {
        // `attempts` counts retries; the first request is not one
        if self.attempts + 1 >= self.policy.max_attempts || !error.should_retry() {
            return RetryDecision::NoRetry;
        }

        self.attempts += 1;
        let delay = self.calculate_delay(error);
        RetryDecision::Retry { delay }
    }

    /// Calculate the delay before the next retry
    fn calculate_delay(&mut self, error: &HttpError) -> Duration {
        if let Some(retry_after_secs) = error.retry_after {
            return Duration::from_secs(retry_after_secs.min(self.policy.max_delay_secs));
        }

        self.backoff
            .next_backoff()
            .unwrap_or(Duration::from_secs(self.policy.max_delay_secs))
    }

    /// Reset the retry handler for a new request
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.backoff.reset();
    }

    /// Get the number of retries made so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl Default for RetryHandler {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

/// Determine if an error classification should be retried
pub fn should_retry_classification(classification: ErrorClassification) -> bool {
    classification.is_retryable()
}

/// Execute a request with retry logic
pub async fn execute_with_retry<F, Fut, T>(
    mut request_fn: F,
    policy: RetryPolicy,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, HttpError>>,
{
    let mut handler = RetryHandler::new(policy);

    loop {
        match request_fn().await {
            Ok(response) => return Ok(response),
            Err(err) => match handler.should_retry(&err) {
                RetryDecision::Retry { delay } => {
                    warn!(
                        attempt = handler.attempts(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::NoRetry => {
                    if err.should_retry() {
                        error!(attempts = handler.attempts(), error = %err, "Request failed, giving up");
                    }
                    return Err(err);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn server_error() -> HttpError {
        HttpError::from_status(StatusCode::SERVICE_UNAVAILABLE, "busy", None)
    }

    #[test]
    fn test_default_retry_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay_secs, 1);
        assert_eq!(policy.max_delay_secs, 30);
        assert!(policy.jitter);
    }

    #[test]
    fn test_retry_handler_max_attempts() {
        let mut handler = RetryHandler::new(RetryPolicy::new(3));
        let error = server_error();

        assert!(matches!(handler.should_retry(&error), RetryDecision::Retry { .. }));
        assert!(matches!(handler.should_retry(&error), RetryDecision::Retry { .. }));
        assert_eq!(handler.attempts(), 2);
        assert_eq!(handler.should_retry(&error), RetryDecision::NoRetry);

        handler.reset();
        assert_eq!(handler.attempts(), 0);
    }

    #[test]
    fn test_non_retryable_errors() {
        let mut handler = RetryHandler::default();
        let no_data = HttpError::from_status(StatusCode::NO_CONTENT, "", None);
        let bad_request = HttpError::from_status(StatusCode::BAD_REQUEST, "Error 400", None);

        assert_eq!(handler.should_retry(&no_data), RetryDecision::NoRetry);
        assert_eq!(handler.should_retry(&bad_request), RetryDecision::NoRetry);
        assert!(!should_retry_classification(ErrorClassification::ClientError));
    }

    #[test]
    fn test_retry_after_header() {
        let mut handler = RetryHandler::default();
        let error = HttpError::from_status(StatusCode::TOO_MANY_REQUESTS, "", Some(10));

        match handler.should_retry(&error) {
            RetryDecision::Retry { delay } => assert_eq!(delay.as_secs(), 10),
            RetryDecision::NoRetry => panic!("Expected retry decision"),
        }
    }

    #[test]
    fn test_exponential_backoff_grows() {
        let mut handler = RetryHandler::new(RetryPolicy::default().with_jitter(false));
        let error = server_error();

        let first = match handler.should_retry(&error) {
            RetryDecision::Retry { delay } => delay,
            RetryDecision::NoRetry => panic!("Expected retry decision"),
        };
        let second = match handler.should_retry(&error) {
            RetryDecision::Retry { delay } => delay,
            RetryDecision::NoRetry => panic!("Expected retry decision"),
        };
        assert!(first.as_secs() >= 1);
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_execute_with_retry_recovers() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3).with_base_delay(0).with_jitter(false);

        let result = execute_with_retry(
            move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(HttpError {
                        status_code: None,
                        classification: ErrorClassification::NetworkError,
                        message: "reset".to_string(),
                        details: None,
                        retry_after: Some(0),
                    })
                } else {
                    Ok("body")
                }
            },
            policy,
        )
        .await;

        assert_eq!(result.unwrap(), "body");
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_execute_with_retry_stops_on_client_error() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), HttpError> = execute_with_retry(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(HttpError::from_status(StatusCode::BAD_REQUEST, "Error 400", None))
            },
            RetryPolicy::default(),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    async fn count_requests(policy: RetryPolicy) -> u32 {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), HttpError> = execute_with_retry(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(server_error())
            },
            policy.with_base_delay(0).with_jitter(false),
        )
        .await;

        assert!(result.is_err());
        counter.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_max_attempts_bounds_requests_sent() {
        assert_eq!(count_requests(RetryPolicy::disabled()).await, 1);
        assert_eq!(count_requests(RetryPolicy::new(1)).await, 1);
        assert_eq!(count_requests(RetryPolicy::new(2)).await, 2);
        assert_eq!(count_requests(RetryPolicy::new(3)).await, 3);
    }
}
