//! Reviewed expected outputs (`expected.json`) of corpus cases

use crate::{GoldenError, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expected output file of a case
pub const EXPECTED_FILE: &str = "expected.json";

/// Reads and writes `expected.json` files inside case directories
pub struct SnapshotManager {
    corpus_dir: PathBuf,
}

impl SnapshotManager {
    /// Create a new snapshot manager rooted at the corpus directory
    pub fn new(corpus_dir: impl AsRef<Path>) -> Self {
        Self {
            corpus_dir: corpus_dir.as_ref().to_path_buf(),
        }
    }

    /// Load the expected output of a case (`category/name`)
    pub fn load(&self, case_id: &str) -> Result<Value> {
        let path = self.snapshot_path(case_id);

        if !path.exists() {
            return Err(GoldenError::CorpusError(format!(
                "Expected output for '{}' not found at {:?}",
                case_id, path
            )));
        }

        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the expected output of a case
    pub fn save(&self, case_id: &str, content: &Value) -> Result<()> {
        let path = self.snapshot_path(case_id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, to_pretty_json(content)?)?;
        Ok(())
    }

    /// Check if a case has an expected output
    pub fn exists(&self, case_id: &str) -> bool {
        self.snapshot_path(case_id).exists()
    }

    /// List the ids of every case with an expected output
    pub fn list(&self) -> Result<Vec<String>> {
        let mut snapshots = Vec::new();

        if !self.corpus_dir.exists() {
            return Ok(snapshots);
        }

        for entry in WalkDir::new(&self.corpus_dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.file_name() != Some(std::ffi::OsStr::new(EXPECTED_FILE)) {
                continue;
            }
            let case_dir = match path.parent().and_then(|p| p.strip_prefix(&self.corpus_dir).ok()) {
                Some(dir) => dir,
                None => continue,
            };
            let id = case_dir
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            snapshots.push(id);
        }

        snapshots.sort();
        Ok(snapshots)
    }

    /// Delete the expected output of a case
    pub fn delete(&self, case_id: &str) -> Result<()> {
        let path = self.snapshot_path(case_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Copy the current expected output aside before it is rewritten
    pub fn backup(&self, case_id: &str) -> Result<()> {
        let source = self.snapshot_path(case_id);
        if !source.exists() {
            return Ok(());
        }

        let backup = source.with_extension(format!("json.backup.{}", Utc::now().timestamp()));
        fs::copy(source, backup)?;
        Ok(())
    }

    fn snapshot_path(&self, case_id: &str) -> PathBuf {
        self.corpus_dir.join(case_id).join(EXPECTED_FILE)
    }
}

/// Render JSON with four-space indentation and a trailing newline
pub fn to_pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| GoldenError::CorpusError(e.to_string()))
}

/// Apply ignore fields to a JSON value
pub fn apply_ignores(value: &mut Value, ignore_fields: &[String]) {
    for field_path in ignore_fields {
        let parts: Vec<&str> = field_path.split('.').filter(|s| !s.is_empty()).collect();
        remove_field_recursive(value, &parts);
    }
}

fn remove_field_recursive(value: &mut Value, path_parts: &[&str]) {
    let Some((first, rest)) = path_parts.split_first() else {
        return;
    };

    match value {
        Value::Object(map) => {
            if rest.is_empty() {
                map.remove(*first);
            } else if let Some(next_value) = map.get_mut(*first) {
                remove_field_recursive(next_value, rest);
            }
        }
        Value::Array(arr) => {
            // Apply to all array elements
            for item in arr {
                remove_field_recursive(item, path_parts);
            }
        }
        _ => {}
    }
}
