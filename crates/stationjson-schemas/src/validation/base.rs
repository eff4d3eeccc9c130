//! Base validation trait and validation context
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ValidationErrors, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validation mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Schema plus every document rule
    Strict,
    /// Schema plus the `created` timestamp rule
    Partial,
    /// Schema validation only
    Basic,
}

impl ValidationMode {
    pub fn includes_timestamp_rules(self) -> bool {
        matches!(self, ValidationMode::Strict | ValidationMode::Partial)
    }

    pub fn includes_epoch_rules(self) -> bool {
        self == ValidationMode::Strict
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Partial => "partial",
            ValidationMode::Basic => "basic",
        };
        f.write_str(name)
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "partial" => Ok(ValidationMode::Partial),
            "basic" => Ok(ValidationMode::Basic),
            other => Err(format!(
                "unknown validation mode '{}' (expected strict, partial or basic)",
                other
            )),
        }
    }
}

/// Validation context carrying the current JSON path and mode
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
    /// Validation mode
    pub mode: ValidationMode,
}

impl ValidationContext {
    /// Create a new validation context
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: "$".to_string(),
            mode,
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
            mode: self.mode,
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            mode: self.mode,
        }
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The type being validated
    type Input;

    /// Validate with every rule
    fn validate(&self, input: &Self::Input) -> ValidationResult<()> {
        let context = ValidationContext::new(ValidationMode::Strict);
        self.validate_with_context(input, &context)
    }

    /// Validate with specific context and mode
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> ValidationResult<()>;

    /// Validate schema plus timestamp rules
    fn validate_partial(&self, input: &Self::Input) -> ValidationResult<()> {
        let context = ValidationContext::new(ValidationMode::Partial);
        self.validate_with_context(input, &context)
    }

    /// Validate basic schema compliance only
    fn validate_basic(&self, input: &Self::Input) -> ValidationResult<()> {
        let context = ValidationContext::new(ValidationMode::Basic);
        self.validate_with_context(input, &context)
    }

    /// Collect all validation errors (non-failing)
    fn collect_errors(&self, input: &Self::Input) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let Err(error) = self.validate(input) {
            errors.add(error);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_context_child() {
        let context = ValidationContext::new(ValidationMode::Strict);
        let child = context.child("networks");
        assert_eq!(child.path, "$.networks");

        let grandchild = child.child_index(0).child("stations");
        assert_eq!(grandchild.path, "$.networks[0].stations");
    }

    #[test]
    fn test_mode_rules() {
        assert!(ValidationMode::Strict.includes_epoch_rules());
        assert!(ValidationMode::Partial.includes_timestamp_rules());
        assert!(!ValidationMode::Partial.includes_epoch_rules());
        assert!(!ValidationMode::Basic.includes_timestamp_rules());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Strict".parse::<ValidationMode>(), Ok(ValidationMode::Strict));
        assert_eq!("basic".parse::<ValidationMode>(), Ok(ValidationMode::Basic));
        assert!("lenient".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::Partial.to_string(), "partial");
    }
}
