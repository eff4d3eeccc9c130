//! Structural JSON comparison with float tolerance and volatile masking

use crate::{GoldenError, Result};
use colored::*;
use regex::Regex;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeSet;

/// Replacement written over a matching volatile value
const MASK: &str = "<masked>";

/// Options for diff comparison
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Whether to use colored output
    pub colored: bool,

    /// Relative tolerance for floating point comparison
    pub float_tolerance: f64,

    /// Whether to show unchanged lines
    pub full_diff: bool,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            colored: true,
            float_tolerance: 1e-9,
            full_diff: false,
            max_diff_lines: 100,
        }
    }
}

/// Result of a diff operation
#[derive(Debug)]
pub struct DiffResult {
    /// Whether the values match
    pub matches: bool,

    /// Human-readable diff output
    pub diff_output: String,

    /// Paths that differ
    pub differing_paths: Vec<String>,
}

/// Engine for comparing JSON values
pub struct DiffEngine {
    options: DiffOptions,
    volatile_patterns: Vec<(String, Regex)>,
}

impl DiffEngine {
    /// Create a new diff engine
    pub fn new(options: DiffOptions) -> Self {
        Self {
            options,
            volatile_patterns: Vec::new(),
        }
    }

    /// Mask the string at `path` (dot-separated, arrays traversed) when it
    /// matches `pattern`
    pub fn add_volatile_pattern(&mut self, path: &str, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern)
            .map_err(|e| GoldenError::CorpusError(format!("Invalid regex pattern: {}", e)))?;

        self.volatile_patterns.push((path.to_string(), regex));
        Ok(())
    }

    /// Compare two JSON values
    pub fn compare(&self, expected: &Value, actual: &Value) -> DiffResult {
        let expected = self.mask_volatile_fields(expected);
        let actual = self.mask_volatile_fields(actual);

        if self.values_match(&expected, &actual) {
            return DiffResult {
                matches: true,
                diff_output: String::new(),
                differing_paths: Vec::new(),
            };
        }

        let mut differing_paths = Vec::new();
        self.collect_diff_paths(&expected, &actual, String::new(), &mut differing_paths);

        DiffResult {
            matches: false,
            diff_output: self.generate_diff_output(&expected, &actual),
            differing_paths,
        }
    }

    /// Check if two values match structurally
    fn values_match(&self, expected: &Value, actual: &Value) -> bool {
        match (expected, actual) {
            (Value::Object(exp), Value::Object(act)) => {
                exp.len() == act.len()
                    && exp.iter().all(|(key, exp_val)| {
                        act.get(key)
                            .map_or(false, |act_val| self.values_match(exp_val, act_val))
                    })
            }
            (Value::Array(exp), Value::Array(act)) => {
                exp.len() == act.len()
                    && exp
                        .iter()
                        .zip(act.iter())
                        .all(|(e, a)| self.values_match(e, a))
            }
            (Value::Number(exp), Value::Number(act)) => match (exp.as_f64(), act.as_f64()) {
                (Some(e), Some(a)) => self.floats_match(e, a),
                _ => exp == act,
            },
            (exp, act) => exp == act,
        }
    }

    fn floats_match(&self, expected: f64, actual: f64) -> bool {
        let scale = expected.abs().max(actual.abs()).max(1.0);
        (expected - actual).abs() <= self.options.float_tolerance * scale
    }

    /// Generate human-readable diff output
    fn generate_diff_output(&self, expected: &Value, actual: &Value) -> String {
        let expected_str = serde_json::to_string_pretty(expected).unwrap_or_default();
        let actual_str = serde_json::to_string_pretty(actual).unwrap_or_default();

        let text_diff = TextDiff::from_lines(&expected_str, &actual_str);
        let mut output = String::new();

        let header = "=== expected vs actual ===\n";
        if self.options.colored {
            output.push_str(&header.bold().to_string());
        } else {
            output.push_str(header);
        }

        let mut line_count = 0;
        for change in text_diff.iter_all_changes() {
            if self.options.max_diff_lines > 0 && line_count >= self.options.max_diff_lines {
                output.push_str("... (diff truncated) ...\n");
                break;
            }

            let line = match change.tag() {
                ChangeTag::Delete if self.options.colored => {
                    format!("{}{}", "-".red(), change.to_string().red())
                }
                ChangeTag::Delete => format!("-{}", change),
                ChangeTag::Insert if self.options.colored => {
                    format!("{}{}", "+".green(), change.to_string().green())
                }
                ChangeTag::Insert => format!("+{}", change),
                ChangeTag::Equal if self.options.full_diff => format!(" {}", change),
                ChangeTag::Equal => continue,
            };

            output.push_str(&line);
            line_count += 1;
        }

        output
    }

    /// Recursively collect paths that differ
    fn collect_diff_paths(&self, expected: &Value, actual: &Value, path: String, paths: &mut Vec<String>) {
        match (expected, actual) {
            (Value::Object(exp), Value::Object(act)) => {
                let all_keys: BTreeSet<_> = exp.keys().chain(act.keys()).collect();

                for key in all_keys {
                    let new_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };

                    match (exp.get(key), act.get(key)) {
                        (Some(exp_val), Some(act_val)) => {
                            if !self.values_match(exp_val, act_val) {
                                self.collect_diff_paths(exp_val, act_val, new_path, paths);
                            }
                        }
                        (Some(_), None) => paths.push(format!("{} (missing in actual)", new_path)),
                        (None, Some(_)) => paths.push(format!("{} (extra in actual)", new_path)),
                        (None, None) => {}
                    }
                }
            }
            (Value::Array(exp), Value::Array(act)) => {
                for (i, (exp_val, act_val)) in exp.iter().zip(act.iter()).enumerate() {
                    if !self.values_match(exp_val, act_val) {
                        self.collect_diff_paths(exp_val, act_val, format!("{}[{}]", path, i), paths);
                    }
                }

                if exp.len() != act.len() {
                    paths.push(format!(
                        "{} (length {} vs {})",
                        path,
                        exp.len(),
                        act.len()
                    ));
                }
            }
            _ => {
                if !self.values_match(expected, actual) {
                    paths.push(path);
                }
            }
        }
    }

    /// Mask volatile fields in a value
    fn mask_volatile_fields(&self, value: &Value) -> Value {
        let mut masked = value.clone();

        for (path, pattern) in &self.volatile_patterns {
            let parts: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
            mask_field_recursive(&mut masked, &parts, pattern);
        }

        masked
    }
}

fn mask_field_recursive(value: &mut Value, path_parts: &[&str], pattern: &Regex) {
    let Some((first, rest)) = path_parts.split_first() else {
        return;
    };

    match value {
        Value::Object(map) => match map.get_mut(*first) {
            Some(field) if rest.is_empty() => {
                if matches!(field, Value::String(s) if pattern.is_match(s)) {
                    *field = Value::String(MASK.to_string());
                }
            }
            Some(next) => mask_field_recursive(next, rest, pattern),
            None => {}
        },
        Value::Array(arr) => {
            for item in arr {
                mask_field_recursive(item, path_parts, pattern);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> DiffEngine {
        DiffEngine::new(DiffOptions {
            colored: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_values_match_exact() {
        let val = json!({"code": "NL", "stations": [{"latitude": 50.764}]});
        assert!(engine().compare(&val, &val.clone()).matches);
    }

    #[test]
    fn test_relative_float_tolerance() {
        let engine = engine();
        assert!(engine.values_match(&json!(6.0e8), &json!(6.0e8 + 0.1)));
        assert!(!engine.values_match(&json!(1.0), &json!(1.001)));
        assert!(engine.values_match(&json!(1), &json!(1.0)));
    }

    #[test]
    fn test_diff_paths() {
        let expected = json!({
            "networks": [{"code": "NL", "stations": [1, 2]}]
        });
        let actual = json!({
            "networks": [{"code": "BE", "stations": [1]}],
            "extra": true
        });

        let result = engine().compare(&expected, &actual);
        assert!(!result.matches);
        assert!(result.differing_paths.contains(&"extra (extra in actual)".to_string()));
        assert!(result.differing_paths.contains(&"networks[0].code".to_string()));
        assert!(result
            .differing_paths
            .contains(&"networks[0].stations (length 2 vs 1)".to_string()));
        assert!(result.diff_output.contains("-"));
    }

    #[test]
    fn test_volatile_field_masking() {
        let mut engine = engine();
        engine
            .add_volatile_pattern("created", r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$")
            .unwrap();

        let val1 = json!({"created": "2025-01-01T00:00:00.000Z", "source": "x"});
        let val2 = json!({"created": "2025-06-30T12:34:56.789Z", "source": "x"});
        assert!(engine.compare(&val1, &val2).matches);

        // A malformed timestamp is not masked and therefore differs
        let val3 = json!({"created": "yesterday", "source": "x"});
        assert!(!engine.compare(&val1, &val3).matches);
    }

    #[test]
    fn test_invalid_pattern() {
        let mut engine = engine();
        assert!(engine.add_volatile_pattern("created", "(").is_err());
    }
}
