//! Client for FDSN station web services
//!
//! Fetching is async; the conversion of the fetched bytes is not.

use crate::http::query::StationQuery;
use crate::http::retry::{execute_with_retry, RetryPolicy};
use crate::http::HttpError;
use crate::mapping::Transformer;
use crate::types::OutputDocument;
use crate::{Error, Result};
use reqwest::{Client as ReqwestClient, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the station client
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Retry policy for failed requests
    pub retry_policy: RetryPolicy,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self {
            retry_policy: RetryPolicy::default(),
            timeout_secs: 60,
            user_agent: format!("stationjson/{}", crate::VERSION),
        }
    }
}

/// HTTP client that retrieves StationXML documents
#[derive(Debug, Clone)]
pub struct StationClient {
    client: ReqwestClient,
    config: StationClientConfig,
}

impl StationClient {
    /// Create a new client
    pub fn new(config: StationClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Http {
                message: format!("Failed to create HTTP client: {}", e),
                status_code: None,
                source: Some(e.into()),
            })?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    pub fn with_default_config() -> Result<Self> {
        Self::new(StationClientConfig::default())
    }

    pub fn config(&self) -> &StationClientConfig {
        &self.config
    }

    /// GET `url` and return the response body
    ///
    /// A 204 answer means the query matched nothing and is reported as an
    /// error rather than an empty document.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let url = url::Url::parse(url).map_err(|e| Error::Configuration {
            message: format!("Invalid URL: {}", e),
            source: Some(e.into()),
        })?;

        debug!(host = url.host_str().unwrap_or(""), "Fetching StationXML");
        let client = self.client.clone();

        let body = execute_with_retry(
            || {
                let client = client.clone();
                let url = url.clone();
                async move {
                    let response = client
                        .get(url)
                        .send()
                        .await
                        .map_err(HttpError::from_request_error)?;

                    let status = response.status();
                    if status == StatusCode::NO_CONTENT || !status.is_success() {
                        return Err(HttpError::from_response(response).await);
                    }

                    response
                        .bytes()
                        .await
                        .map(|bytes| bytes.to_vec())
                        .map_err(HttpError::from_request_error)
                }
            },
            self.config.retry_policy.clone(),
        )
        .await?;

        info!(bytes = body.len(), "Fetched StationXML");
        Ok(body)
    }

    /// Fetch the document described by `query`
    pub async fn fetch_query(&self, query: &StationQuery) -> Result<Vec<u8>> {
        let url = query.to_url()?;
        self.fetch(url.as_str()).await
    }

    /// Fetch a query result and convert it
    pub async fn fetch_and_convert(
        &self,
        query: &StationQuery,
        transformer: &Transformer,
    ) -> Result<OutputDocument> {
        let bytes = self.fetch_query(query).await?;
        transformer.convert(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StationClientConfig::default();
        assert_eq!(config.timeout_secs, 60);
        assert!(config.user_agent.starts_with("stationjson/"));
        assert_eq!(config.retry_policy.max_attempts, 3);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let client = StationClient::with_default_config().unwrap();
        let err = client.fetch("::not-a-url").await.unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_fails() {
        let config = StationClientConfig {
            retry_policy: RetryPolicy::disabled(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = StationClient::new(config).unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections
        let err = client.fetch("http://127.0.0.1:9/query").await.unwrap_err();
        assert!(matches!(err, Error::Http { .. }));
    }
}
