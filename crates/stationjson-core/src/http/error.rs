//! HTTP error classification for FDSN web-service requests
//!
//! FDSN services answer errors with a short plain-text body whose first line
//! summarises the problem; that line becomes the error message.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest body excerpt kept on an error
const MAX_DETAIL_LEN: usize = 1024;

/// Classification of HTTP errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClassification {
    /// Client errors (4xx) - should not retry
    ClientError,
    /// Server errors (5xx) - should retry
    ServerError,
    /// Network errors - should retry
    NetworkError,
    /// Rate limiting - should retry with backoff
    RateLimitError,
    /// Authentication errors - should not retry
    AuthenticationError,
    /// The query matched no data (204, or 404 with `nodata=404`)
    NoData,
    /// Unknown errors - default to no retry
    Unknown,
}

impl ErrorClassification {
    /// Check if this error type should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorClassification::ServerError
                | ErrorClassification::NetworkError
                | ErrorClassification::RateLimitError
        )
    }

    /// Get recommended retry delay in seconds
    pub fn retry_delay_hint(&self) -> Option<u64> {
        match self {
            ErrorClassification::RateLimitError => Some(30),
            ErrorClassification::ServerError => Some(5),
            ErrorClassification::NetworkError => Some(2),
            _ => None,
        }
    }
}

/// Normalized HTTP error representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpError {
    /// HTTP status code if available
    pub status_code: Option<u16>,
    /// Error classification for retry logic
    pub classification: ErrorClassification,
    /// Human-readable error message
    pub message: String,
    /// Excerpt of the response body
    pub details: Option<String>,
    /// Retry-After header value if present
    pub retry_after: Option<u64>,
}

impl HttpError {
    /// Create from a non-success reqwest Response
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();
        Self::from_status(status, &body, retry_after)
    }

    /// Build from a status code and response body
    pub fn from_status(status: StatusCode, body: &str, retry_after: Option<u64>) -> Self {
        let classification = Self::classify_status(status);
        let message = match classification {
            ErrorClassification::NoData => "No data matched the query".to_string(),
            _ => Self::summarize_body(body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            }),
        };
        let details = if body.trim().is_empty() {
            None
        } else {
            Some(body.chars().take(MAX_DETAIL_LEN).collect())
        };

        Self {
            status_code: Some(status.as_u16()),
            classification,
            message,
            details,
            retry_after,
        }
    }

    /// Create from a network/request error
    pub fn from_request_error(error: reqwest::Error) -> Self {
        let classification = if error.is_timeout() || error.is_connect() || error.is_body() {
            ErrorClassification::NetworkError
        } else {
            ErrorClassification::Unknown
        };

        Self {
            status_code: error.status().map(|s| s.as_u16()),
            classification,
            message: error.to_string(),
            details: None,
            retry_after: None,
        }
    }

    /// Classify HTTP status code
    fn classify_status(status: StatusCode) -> ErrorClassification {
        match status.as_u16() {
            204 | 404 => ErrorClassification::NoData,
            401 | 403 => ErrorClassification::AuthenticationError,
            429 => ErrorClassification::RateLimitError,
            400..=499 => ErrorClassification::ClientError,
            500..=599 => ErrorClassification::ServerError,
            _ => ErrorClassification::Unknown,
        }
    }

    /// First non-empty line of a plain-text error body
    fn summarize_body(body: &str) -> Option<String> {
        body.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
    }

    /// Check if this error should trigger a retry
    pub fn should_retry(&self) -> bool {
        self.classification.is_retryable()
    }

    /// Get the delay before retry (in seconds)
    pub fn get_retry_delay(&self) -> Option<u64> {
        // Prefer Retry-After header if present
        self.retry_after
            .or_else(|| self.classification.retry_delay_hint())
    }

    /// Get the error classification
    pub fn classification(&self) -> ErrorClassification {
        self.classification
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP Error [{}]: {} (classification: {:?})",
            self.status_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            self.message,
            self.classification
        )
    }
}

impl std::error::Error for HttpError {}

/// Convert HttpError to crate Error
impl From<HttpError> for crate::Error {
    fn from(http_error: HttpError) -> Self {
        let source = http_error
            .details
            .clone()
            .map(|details| anyhow::anyhow!("{}", details));
        crate::Error::Http {
            message: http_error.message,
            status_code: http_error.status_code,
            source,
        }
    }
}
