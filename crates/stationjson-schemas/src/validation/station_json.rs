//! StationJSON validation: JSON Schema plus document rules
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use crate::loader::{bundled_schema, load_schema_file};
use crate::validation::base::{SchemaValidator, ValidationContext};
use crate::validation::error::{Rule, ValidationError, ValidationResult, Violation};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::path::Path;

/// StationJSON validator
#[derive(Debug)]
pub struct StationJsonValidator {
    schema: Value,
    compiled: jsonschema::Validator,
}

impl StationJsonValidator {
    /// Create a validator for the bundled StationJSON 1.0 schema
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_schema(bundled_schema()?)
    }

    /// Create a validator from a schema file (JSON or YAML)
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_schema(load_schema_file(path)?)
    }

    /// Compile a validator from an in-memory schema
    pub fn from_schema(schema: Value) -> Result<Self, Box<dyn std::error::Error>> {
        let compiled = jsonschema::validator_for(&schema)
            .map_err(|e| format!("Invalid schema: {}", e))?;
        Ok(Self { schema, compiled })
    }

    /// Get the loaded schema
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    fn schema_violations(&self, document: &Value) -> Vec<Violation> {
        self.compiled
            .iter_errors(document)
            .map(|e| {
                Violation::schema(
                    &e.instance_path.to_string(),
                    e.schema_path.to_string(),
                    e.to_string(),
                )
            })
            .collect()
    }

    fn timestamp_violations(&self, document: &Value, ctx: &ValidationContext) -> Vec<Violation> {
        match document.get("created").and_then(Value::as_str) {
            Some(created) if DateTime::parse_from_rfc3339(created).is_err() => {
                vec![Violation::document(
                    Rule::CreatedTimestamp,
                    ctx.child("created").path,
                    format!("'{}' is not an RFC 3339 timestamp", created),
                )]
            }
            _ => Vec::new(),
        }
    }

    fn epoch_violations(&self, document: &Value, ctx: &ValidationContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let networks = ctx.child("networks");

        for (n, network) in array(document, "networks").iter().enumerate() {
            let network_ctx = networks.child_index(n);
            check_epoch(network, &network_ctx, &mut violations);

            let stations = network_ctx.child("stations");
            for (s, station) in array(network, "stations").iter().enumerate() {
                let station_ctx = stations.child_index(s);
                check_epoch(station, &station_ctx, &mut violations);

                let channels = station_ctx.child("channels");
                for (c, channel) in array(station, "channels").iter().enumerate() {
                    check_epoch(channel, &channels.child_index(c), &mut violations);
                }
            }
        }

        violations
    }
}

impl SchemaValidator for StationJsonValidator {
    type Input = Value;

    fn validate_with_context(&self, document: &Value, ctx: &ValidationContext) -> ValidationResult<()> {
        let mut violations = self.schema_violations(document);

        if ctx.mode.includes_timestamp_rules() {
            violations.extend(self.timestamp_violations(document, ctx));
        }

        if ctx.mode.includes_epoch_rules() {
            violations.extend(self.epoch_violations(document, ctx));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::with_violations(
                ctx.path.clone(),
                format!("{} violation(s) in {} mode", violations.len(), ctx.mode),
                violations,
            ))
        }
    }
}

fn array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn check_epoch(record: &Value, ctx: &ValidationContext, violations: &mut Vec<Violation>) {
    let start = record.get("startTime").and_then(Value::as_str);
    let end = record.get("endTime").and_then(Value::as_str);

    let (Some(start), Some(end)) = (start, end) else {
        return;
    };

    match (parse_epoch(start), parse_epoch(end)) {
        (Some(from), Some(to)) if from > to => {
            violations.push(Violation::document(
                Rule::EpochOrder,
                ctx.path.clone(),
                format!("startTime {} is after endTime {}", start, end),
            ));
        }
        (None, _) | (_, None) => {
            violations.push(Violation::document(
                Rule::EpochFormat,
                ctx.path.clone(),
                format!("startTime={}, endTime={} are not ISO 8601 date-times", start, end),
            ));
        }
        _ => {}
    }
}

/// StationXML date-times, with or without zone designator
fn parse_epoch(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    let local = text.strip_suffix('Z').unwrap_or(text);
    NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(local, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::base::ValidationMode;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "schemaVersion": "1.0",
            "module": null,
            "source": "StationXML2StationJSON",
            "created": "2024-05-01T12:00:00.000Z",
            "networks": [{
                "code": "NL",
                "startTime": "1993-01-01T00:00:00",
                "endTime": null,
                "description": "KNMI",
                "restrictedStatus": "open",
                "stations": [{
                    "code": "HGN",
                    "startTime": "2001-06-06T00:00:00",
                    "endTime": "2030-01-01T00:00:00",
                    "latitude": 50.764,
                    "longitude": 5.9317,
                    "elevation": 135.0,
                    "site": {"name": "HEIMANSGROEVE", "country": null},
                    "restrictedStatus": null,
                    "channels": [{
                        "location": "02", "code": "BHZ",
                        "startTime": null, "endTime": null,
                        "latitude": null, "longitude": null, "elevation": null,
                        "depth": null, "azimuth": null, "dip": null,
                        "sensorDescription": null, "sampleRate": 40.0,
                        "scale": 6.0e8, "scaleUnits": "m/s", "scaleFrequency": 1.0,
                        "restrictedStatus": null,
                        "responseStages": [{
                            "gain": 1.0, "gainFrequency": null,
                            "type": "paz",
                            "inputUnits": "m/s", "outputUnits": "V",
                            "transferFunctionType": "LAPLACE (RADIANS/SECOND)",
                            "normalizationFactor": 1.0, "normalizationFrequency": null,
                            "zeros": [[0.0, 0.0]], "poles": []
                        }]
                    }]
                }]
            }]
        })
    }

    #[test]
    fn test_valid_document() {
        let validator = StationJsonValidator::new().unwrap();
        assert!(validator.validate(&document()).is_ok());
    }

    #[test]
    fn test_missing_description_fails_schema() {
        let validator = StationJsonValidator::new().unwrap();
        let mut doc = document();
        doc["networks"][0].as_object_mut().unwrap().remove("description");

        let err = validator.validate_basic(&doc).unwrap_err();
        assert_eq!(err.violations_of(Rule::JsonSchema).count(), err.violation_count());
        let violation = &err.schema_violations[0];
        assert_eq!(violation.location, "$.networks[0]");
        assert!(violation.message.contains("description"));
        assert!(violation
            .schema_path
            .as_deref()
            .is_some_and(|p| p.ends_with("/required")));
    }

    #[test]
    fn test_unknown_stage_key_fails_schema() {
        let validator = StationJsonValidator::new().unwrap();
        let mut doc = document();
        doc["networks"][0]["stations"][0]["channels"][0]["responseStages"][0]["firCoefficients"] = json!([1.0]);

        assert!(validator.validate_basic(&doc).is_err());
    }

    #[test]
    fn test_stage_without_type_is_valid() {
        let validator = StationJsonValidator::new().unwrap();
        let mut doc = document();
        doc["networks"][0]["stations"][0]["channels"][0]["responseStages"] =
            json!([{"gain": 2.0, "gainFrequency": null}]);

        assert!(validator.validate(&doc).is_ok());
    }

    #[test]
    fn test_created_checked_in_partial_mode_only() {
        let validator = StationJsonValidator::new().unwrap();
        let mut doc = document();
        doc["created"] = json!("yesterday");

        assert!(validator.validate_basic(&doc).is_ok());
        let err = validator.validate_partial(&doc).unwrap_err();
        assert_eq!(err.schema_violations[0].rule, Rule::CreatedTimestamp);
        assert_eq!(err.schema_violations[0].location, "$.created");
    }

    #[test]
    fn test_epoch_order_checked_in_strict_mode() {
        let validator = StationJsonValidator::new().unwrap();
        let mut doc = document();
        doc["networks"][0]["stations"][0]["endTime"] = json!("1999-01-01T00:00:00");

        assert!(validator.validate_partial(&doc).is_ok());
        let err = validator.validate(&doc).unwrap_err();
        assert_eq!(err.violation_count(), 1);
        let violation = &err.schema_violations[0];
        assert_eq!(violation.rule, Rule::EpochOrder);
        assert_eq!(violation.location, "$.networks[0].stations[0]");
        assert_eq!(violation.schema_path, None);
    }

    #[test]
    fn test_context_mode_is_respected() {
        let validator = StationJsonValidator::new().unwrap();
        let mut doc = document();
        doc["created"] = json!("soon");

        let ctx = ValidationContext::new(ValidationMode::Basic);
        assert!(validator.validate_with_context(&doc, &ctx).is_ok());
    }

    #[test]
    fn test_parse_epoch_variants() {
        assert!(parse_epoch("2008-10-01T00:00:00").is_some());
        assert!(parse_epoch("2008-10-01T00:00:00.5Z").is_some());
        assert!(parse_epoch("2008-10-01T00:00:00+02:00").is_some());
        assert!(parse_epoch("2008-10-01").is_some());
        assert!(parse_epoch("October").is_none());
    }
}
