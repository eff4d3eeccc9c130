//! StationJSON Core - conversion engine for FDSN StationXML metadata
//!
//! This crate maps a StationXML document (Network → Station → Channel →
//! Response) onto the flatter StationJSON schema.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror` and `anyhow`
//! - **XML Tree**: Namespace-resolved element tree built with `quick-xml`
//! - **Mapping**: Path resolver, stage classifier and level extractors
//! - **Fetching**: FDSN station web-service client with retries
//!
//! # Example
//!
//! ```no_run
//! use stationjson_core::{convert, Result};
//!
//! fn example(xml: &[u8]) -> Result<()> {
//!     let document = convert(xml)?;
//!     assert_eq!(document.schema_version, "1.0");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod mapping;
pub mod types;
pub mod xml;

// Re-export main types for convenience
pub use error::{Error, ErrorKind, Result};
pub use mapping::{ConversionContext, StageKind, Transformer};
pub use types::{
    // Document
    OutputDocument, ConversionSummary,

    // Hierarchy
    Network, Station, Site, Channel,

    // Response
    ResponseStage, StagePayload, Decimation, InstrumentPolynomial, Complex,
    PolesZeros, Coefficients, Fir, ResponseList, ResponseListItem, PolynomialStage,
};
pub use xml::XmlElement;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert StationXML bytes with default settings
///
/// Equivalent to `Transformer::new().convert(xml)`: no module identifier and
/// `created` set to the current time.
pub fn convert(xml: &[u8]) -> Result<OutputDocument> {
    Transformer::new().convert(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_convert_empty_document() {
        let xml = br#"<FDSNStationXML xmlns="http://www.fdsn.org/xml/station/1" schemaVersion="1.1"><Source>test</Source></FDSNStationXML>"#;
        let doc = convert(xml).unwrap();
        assert!(doc.networks.is_empty());
        assert_eq!(doc.source, "StationXML2StationJSON");
        assert!(doc.module.is_none());
    }

    #[test]
    fn test_convert_rejects_foreign_root() {
        let err = convert(b"<root/>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
    }
}
