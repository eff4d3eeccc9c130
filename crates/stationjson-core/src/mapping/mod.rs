//! StationXML to StationJSON mapping
//!
//! The mapping walks the parsed element tree top-down
//! (Document → Network → Station → Channel → Response → Stage) and builds
//! the output records level by level. It is pure: no I/O, no shared state,
//! and any fatal condition aborts the whole conversion.
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

pub mod channel;
pub mod context;
pub mod document;
pub mod network;
pub mod resolver;
pub mod scope;
pub mod stage;
pub mod station;
pub mod tags;

use crate::types::OutputDocument;
use crate::xml::{parse_document, XmlElement};
use crate::Result;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::debug;

pub use context::{format_timestamp, ConversionContext};
pub use resolver::{locate, parse_float, resolve_float, resolve_text, resolve_with, TagPath};
pub use scope::Scope;
pub use stage::{classify, extract_stage, StageKind};

/// Converts StationXML documents into StationJSON documents
///
/// A `Transformer` is immutable once built and can be shared between
/// threads; each call to [`Transformer::convert`] owns its own parse tree.
///
/// # Example
///
/// ```no_run
/// use stationjson_core::Transformer;
///
/// # fn example(xml: &[u8]) -> stationjson_core::Result<()> {
/// let document = Transformer::new().with_module("ORFEUS").convert(xml)?;
/// println!("{}", serde_json::to_string_pretty(&document)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformer {
    module: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

impl Transformer {
    /// Create a transformer with no module and a wall-clock `created`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `module` identifier written to every document
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Pin the `created` timestamp instead of using the current time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Parse and convert raw StationXML bytes
    pub fn convert(&self, xml: &[u8]) -> Result<OutputDocument> {
        let start = Instant::now();
        let root = parse_document(xml)?;
        let document = self.convert_element(&root)?;

        let summary = document.summary();
        debug!(
            networks = summary.networks,
            stations = summary.stations,
            channels = summary.channels,
            stages = summary.stages,
            bytes = xml.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Converted StationXML document"
        );
        Ok(document)
    }

    /// Convert StationXML text
    pub fn convert_str(&self, xml: &str) -> Result<OutputDocument> {
        self.convert(xml.as_bytes())
    }

    /// Convert an already parsed document root
    pub fn convert_element(&self, root: &XmlElement) -> Result<OutputDocument> {
        document::assemble(root, &self.context())
    }

    fn context(&self) -> ConversionContext {
        match self.timestamp {
            Some(created) => ConversionContext::at(self.module.clone(), created),
            None => ConversionContext::new(self.module.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::TimeZone;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_transformer_is_send_sync() {
        assert_send_sync::<Transformer>();
    }

    #[test]
    fn test_builder() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let transformer = Transformer::new().with_module("ORFEUS").with_timestamp(instant);
        assert_eq!(transformer.module(), Some("ORFEUS"));

        let xml = format!(r#"<FDSNStationXML xmlns="{}"/>"#, tags::NAMESPACE);
        let doc = transformer.convert_str(&xml).unwrap();
        assert_eq!(doc.module.as_deref(), Some("ORFEUS"));
        assert_eq!(doc.created, "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_malformed_xml() {
        let err = Transformer::new().convert(b"<FDSNStationXML").unwrap_err();
        assert!(matches!(err, Error::MalformedXml { .. }));
    }
}
