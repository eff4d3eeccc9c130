//! Per-conversion settings
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, SecondsFormat, Utc};

/// Values fixed for the duration of one conversion
///
/// The `created` instant is taken once when the context is built so every
/// part of the document sees the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionContext {
    /// Identifier written to the `module` field
    pub module: Option<String>,

    /// Conversion time
    pub created: DateTime<Utc>,
}

impl ConversionContext {
    /// Create a context stamped with the current time
    pub fn new(module: Option<String>) -> Self {
        Self {
            module,
            created: Utc::now(),
        }
    }

    /// Create a context with a caller-supplied timestamp
    pub fn at(module: Option<String>, created: DateTime<Utc>) -> Self {
        Self { module, created }
    }

    /// `created` as RFC 3339 with millisecond precision and a `Z` suffix
    pub fn created_timestamp(&self) -> String {
        format_timestamp(&self.created)
    }
}

/// Format an instant the way the `created` field expects
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_created_format() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let context = ConversionContext::at(Some("test".to_string()), instant);
        assert_eq!(context.created_timestamp(), "2024-05-01T12:00:00.000Z");
        assert_eq!(context.module.as_deref(), Some("test"));
    }

    #[test]
    fn test_new_uses_current_time() {
        let before = Utc::now();
        let context = ConversionContext::new(None);
        let after = Utc::now();
        assert!(context.created >= before && context.created <= after);
    }
}
