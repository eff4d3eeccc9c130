//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use serde_json::Value;
use stationjson_schemas::StationJsonValidator;
use std::fs;
use std::path::Path;

/// Build the validator for an explicit schema, the configured one, or the
/// bundled schema
pub fn load_validator(schema: Option<&Path>, config: &Config) -> Result<StationJsonValidator> {
    match schema.or(config.paths.schema.as_deref()) {
        Some(path) => {
            tracing::debug!(schema = %path.display(), "Loading schema file");
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            StationJsonValidator::from_path(path)
                .map_err(|e| Error::config(format!("Cannot load schema {}: {}", path.display(), e)))
        }
        None => StationJsonValidator::new()
            .map_err(|e| Error::config(format!("Cannot load bundled schema: {}", e))),
    }
}

/// Read a StationJSON document, parsing YAML for `.yaml`/`.yml` files
pub fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}
