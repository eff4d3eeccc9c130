//! Validation of StationJSON documents
//!
//! JSON Schema validation with document rules layered on top, selected by
//! [`ValidationMode`]:
//!
//! - **Basic**: JSON Schema validation only
//! - **Partial**: Schema + `created` timestamp format
//! - **Strict**: Partial + epoch ordering on networks, stations and channels
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod station_json;

pub use base::{SchemaValidator, ValidationContext, ValidationMode};
pub use error::{Rule, ValidationError, ValidationErrors, ValidationResult, Violation};
pub use station_json::StationJsonValidator;

/// Convenience function to create a validator for the bundled schema
///
/// # Examples
///
/// ```rust
/// use stationjson_schemas::validation::{create_station_json_validator, SchemaValidator};
/// use serde_json::json;
///
/// let validator = create_station_json_validator().unwrap();
/// assert!(validator.validate_basic(&json!({"networks": []})).is_err());
/// ```
pub fn create_station_json_validator() -> Result<StationJsonValidator, Box<dyn std::error::Error>> {
    StationJsonValidator::new()
}

/// Validation configuration for batch operations
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Validation mode to use
    pub mode: ValidationMode,
    /// Whether to stop on first error or collect all errors
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ValidationConfig {
    fn with_mode(mode: ValidationMode) -> Self {
        Self {
            mode,
            fail_fast: false,
            max_errors: 0,
        }
    }

    /// Create a configuration for strict validation
    pub fn strict() -> Self {
        Self::with_mode(ValidationMode::Strict)
    }

    /// Create a configuration for partial validation
    pub fn partial() -> Self {
        Self::with_mode(ValidationMode::Partial)
    }

    /// Create a configuration for basic validation
    pub fn basic() -> Self {
        Self::with_mode(ValidationMode::Basic)
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Batch validation of several StationJSON documents
///
/// Each failing document contributes one error whose path is its index
/// (`$[i]`).
pub fn validate_station_json_batch(
    validator: &StationJsonValidator,
    documents: &[serde_json::Value],
    config: &ValidationConfig,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let context = ValidationContext::new(config.mode);

    for (i, document) in documents.iter().enumerate() {
        let document_context = context.child_index(i);
        if let Err(error) = validator.validate_with_context(document, &document_context) {
            errors.add(error);

            if config.fail_fast {
                break;
            }

            if config.max_errors > 0 && errors.len() >= config.max_errors {
                break;
            }
        }
    }

    errors.into_result()
}
