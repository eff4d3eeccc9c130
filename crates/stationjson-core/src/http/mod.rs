//! Retrieval of StationXML from FDSN station web services
//!
//! This module provides:
//! - Query URL building for `fdsnws-station`
//! - Error classification of failed requests
//! - Retry logic with exponential backoff

pub mod client;
pub mod error;
pub mod query;
pub mod retry;

pub use client::{StationClient, StationClientConfig};
pub use error::{ErrorClassification, HttpError};
pub use query::{Level, StationQuery, DEFAULT_BASE_URL};
pub use retry::{RetryDecision, RetryPolicy};

// Re-export commonly used types
pub use reqwest::StatusCode;
