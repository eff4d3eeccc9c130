//! Schema loading: the bundled StationJSON schema or a file on disk
//!
//! Copyright (c) 2025 StationJSON Contributors
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// StationJSON 1.0 schema, embedded at compile time
pub const BUNDLED_SCHEMA: &str = include_str!("../schemas/station-json.schema.json");

/// Errors raised while loading a schema document
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON schema {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML schema {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Bundled schema is not valid JSON: {0}")]
    Bundled(#[from] serde_json::Error),

    #[error("Schema at {path} is not a JSON object")]
    NotAnObject { path: PathBuf },
}

/// Parse the bundled schema
pub fn bundled_schema() -> Result<Value, LoaderError> {
    Ok(serde_json::from_str(BUNDLED_SCHEMA)?)
}

/// Load a schema from a `.json`, `.yaml` or `.yml` file
///
/// Files with any other extension are parsed as JSON.
pub fn load_schema_file(path: &Path) -> Result<Value, LoaderError> {
    let content = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let schema: Value = if is_yaml {
        serde_yaml::from_str(&content).map_err(|source| LoaderError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_str(&content).map_err(|source| LoaderError::Json {
            path: path.to_path_buf(),
            source,
        })?
    };

    if !schema.is_object() {
        return Err(LoaderError::NotAnObject {
            path: path.to_path_buf(),
        });
    }

    Ok(schema)
}
