//! Validation error types for StationJSON documents
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which check produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// The bundled or user-supplied JSON Schema
    JsonSchema,
    /// `created` is not an RFC 3339 timestamp
    CreatedTimestamp,
    /// `startTime` is after `endTime`
    EpochOrder,
    /// `startTime` or `endTime` is not an ISO 8601 date-time
    EpochFormat,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::JsonSchema => "json_schema",
            Rule::CreatedTimestamp => "created_timestamp",
            Rule::EpochOrder => "epoch_order",
            Rule::EpochFormat => "epoch_format",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed check, located in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: Rule,
    /// `$.networks[0].stations[1]` style path of the offending value
    pub location: String,
    /// Keyword location inside the schema, for `json_schema` violations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
    pub message: String,
}

impl Violation {
    /// A violation reported by the JSON Schema, located by JSON pointer
    pub fn schema<S, M>(instance_pointer: &str, schema_path: S, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self {
            rule: Rule::JsonSchema,
            location: pointer_to_path(instance_pointer),
            schema_path: Some(schema_path.into()),
            message: message.into(),
        }
    }

    /// A violation of one of the document rules
    pub fn document<L, M>(rule: Rule, location: L, message: M) -> Self
    where
        L: Into<String>,
        M: Into<String>,
    {
        Self {
            rule,
            location: location.into(),
            schema_path: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.location, self.message)?;
        if let Some(schema_path) = &self.schema_path {
            write!(f, " (schema {})", schema_path)?;
        }
        Ok(())
    }
}

/// Rewrite a JSON pointer (`/networks/0/code`) as `$.networks[0].code`
pub fn pointer_to_path(pointer: &str) -> String {
    let mut path = String::from("$");
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            path.push('[');
            path.push_str(&segment);
            path.push(']');
        } else {
            path.push('.');
            path.push_str(&segment);
        }
    }
    path
}

/// Schema validation error with path context and detailed violations
#[derive(Debug, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON path where the error occurred
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Detailed schema violations
    pub schema_violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error at '{}': {}", self.path, self.message)?;
        for violation in &self.schema_violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self::with_violations(path, message, Vec::new())
    }

    /// Create a validation error with violations
    pub fn with_violations<P, M>(path: P, message: M, violations: Vec<Violation>) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            schema_violations: violations,
        }
    }

    /// Number of violations carried by this error
    pub fn violation_count(&self) -> usize {
        self.schema_violations.len()
    }

    /// Violations produced by one rule
    pub fn violations_of(&self, rule: Rule) -> impl Iterator<Item = &Violation> {
        self.schema_violations.iter().filter(move |v| v.rule == rule)
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Multiple validation errors that can occur during batch validation
#[derive(Debug, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// List of validation errors
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} document(s) failed validation:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create a new validation errors collection
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
        }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Convert to result - Ok if no errors, Err if any errors exist
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}
