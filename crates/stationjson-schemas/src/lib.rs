//! StationJSON Schemas - JSON Schema definition and validators
//!
//! This crate bundles the JSON Schema (draft 2020-12) for StationJSON 1.0 and
//! validates converted documents against it.
//!
//! ## Quick Start
//!
//! ```rust
//! use stationjson_schemas::{create_station_json_validator, SchemaValidator};
//! use serde_json::json;
//!
//! let validator = create_station_json_validator().unwrap();
//!
//! let document = json!({
//!     "schemaVersion": "1.0",
//!     "module": null,
//!     "source": "StationXML2StationJSON",
//!     "created": "2024-05-01T12:00:00.000Z",
//!     "networks": []
//! });
//!
//! assert!(validator.validate(&document).is_ok());
//! ```
//!
//! ## Validation Modes
//!
//! - **Basic**: JSON Schema validation only
//! - **Partial**: Schema + `created` must be an RFC 3339 timestamp
//! - **Strict**: Partial + every epoch must start no later than it ends
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

#![recursion_limit = "256"]
pub mod loader;
pub mod validation;

pub use loader::{bundled_schema, load_schema_file, LoaderError, BUNDLED_SCHEMA};
pub use validation::{
    create_station_json_validator, validate_station_json_batch, Rule, SchemaValidator,
    StationJsonValidator, ValidationConfig, ValidationContext, ValidationError, ValidationErrors,
    ValidationMode, ValidationResult, Violation,
};
