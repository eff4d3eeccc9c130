//! Test corpus management for golden tests

use crate::{GoldenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File describing one case
pub const CASE_FILE: &str = "test.json";

/// Default StationXML input file of a case
pub const INPUT_FILE: &str = "input.xml";

/// A test case in the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Name of the test case
    pub name: String,

    /// Category/group of the test
    pub category: String,

    /// StationXML input, relative to the case directory
    #[serde(default = "default_input")]
    pub input: String,

    /// Module identifier passed to the converter
    #[serde(default)]
    pub module: Option<String>,

    /// Expected behavior configuration
    pub expectations: TestExpectations,

    /// Test metadata
    pub metadata: TestMetadata,

    /// Directory the case was loaded from
    #[serde(skip)]
    pub dir: PathBuf,
}

/// Expected behavior for a test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestExpectations {
    /// Whether the conversion should succeed
    pub should_succeed: bool,

    /// Regex the error message must match if should_succeed is false
    pub error_pattern: Option<String>,

    /// Fields to ignore in comparison
    #[serde(default)]
    pub ignore_fields: Vec<String>,

    /// Volatile fields that may change
    #[serde(default)]
    pub volatile_fields: Vec<VolatileFieldSpec>,
}

/// Specification for a volatile field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatileFieldSpec {
    pub path: String,
    pub pattern: String,
}

/// Metadata about a test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetadata {
    /// Description of what this tests
    pub description: String,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether this test is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Priority level (lower = higher priority)
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_input() -> String {
    INPUT_FILE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_priority() -> u32 {
    100
}

impl TestCase {
    /// `category/name`
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }

    /// Read the StationXML input bytes
    pub fn load_input(&self) -> Result<Vec<u8>> {
        let path = self.dir.join(&self.input);
        fs::read(&path).map_err(|e| {
            GoldenError::CorpusError(format!("Cannot read input {}: {}", path.display(), e))
        })
    }
}

/// Manages the test corpus
pub struct CorpusManager {
    corpus_dir: PathBuf,
}

impl CorpusManager {
    /// Create a new corpus manager
    pub fn new(corpus_dir: impl AsRef<Path>) -> Self {
        Self {
            corpus_dir: corpus_dir.as_ref().to_path_buf(),
        }
    }

    pub fn corpus_dir(&self) -> &Path {
        &self.corpus_dir
    }

    /// Discover all test cases in the corpus, highest priority first
    pub fn discover_tests(&self) -> Result<Vec<TestCase>> {
        let mut tests = Vec::new();

        if !self.corpus_dir.exists() {
            return Ok(tests);
        }

        for entry in WalkDir::new(&self.corpus_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && path.file_name() == Some(std::ffi::OsStr::new(CASE_FILE)) {
                match self.load_test_case(path) {
                    Ok(test_case) => tests.push(test_case),
                    Err(e) => {
                        eprintln!("Warning: Failed to load test case {:?}: {}", path, e);
                    }
                }
            }
        }

        tests.sort_by(|a, b| {
            a.metadata
                .priority
                .cmp(&b.metadata.priority)
                .then_with(|| a.id().cmp(&b.id()))
        });

        Ok(tests)
    }

    /// Load a specific test case from its `test.json`
    pub fn load_test_case(&self, path: &Path) -> Result<TestCase> {
        let content = fs::read_to_string(path)?;
        let mut test_case: TestCase = serde_json::from_str(&content)?;
        test_case.dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| GoldenError::CorpusError(format!("{:?} has no parent directory", path)))?;
        Ok(test_case)
    }

    /// Filter tests by category
    pub fn filter_by_category(&self, tests: Vec<TestCase>, category: &str) -> Vec<TestCase> {
        tests
            .into_iter()
            .filter(|t| t.category == category || category == "*")
            .collect()
    }

    /// Filter tests by tags
    pub fn filter_by_tags(&self, tests: Vec<TestCase>, tags: &[String]) -> Vec<TestCase> {
        if tags.is_empty() {
            return tests;
        }

        tests
            .into_iter()
            .filter(|t| tags.iter().any(|tag| t.metadata.tags.contains(tag)))
            .collect()
    }

    /// Get enabled tests only
    pub fn filter_enabled(&self, tests: Vec<TestCase>) -> Vec<TestCase> {
        tests.into_iter().filter(|t| t.metadata.enabled).collect()
    }

    /// Create the corpus directory structure with one sample case
    pub fn init_corpus(&self) -> Result<()> {
        for dir in ["basic", "stages", "edge-cases", "errors"] {
            fs::create_dir_all(self.corpus_dir.join(dir))?;
        }

        self.create_sample_test()
    }

    fn create_sample_test(&self) -> Result<()> {
        let test_dir = self.corpus_dir.join("basic/empty-network");
        fs::create_dir_all(&test_dir)?;

        let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<FDSNStationXML xmlns="http://www.fdsn.org/xml/station/1" schemaVersion="1.1">
  <Source>sample</Source>
  <Created>2024-01-01T00:00:00</Created>
  <Network code="XX">
    <Description>Sample network</Description>
  </Network>
</FDSNStationXML>
"#;
        fs::write(test_dir.join(INPUT_FILE), input)?;

        let test_case = TestCase {
            name: "empty-network".to_string(),
            category: "basic".to_string(),
            input: INPUT_FILE.to_string(),
            module: None,
            expectations: TestExpectations {
                should_succeed: true,
                error_pattern: None,
                ignore_fields: vec![],
                volatile_fields: vec![],
            },
            metadata: TestMetadata {
                description: "Network without stations".to_string(),
                tags: vec!["basic".to_string(), "smoke".to_string()],
                enabled: true,
                priority: 1,
            },
            dir: PathBuf::new(),
        };

        let content = serde_json::to_string_pretty(&test_case)?;
        fs::write(test_dir.join(CASE_FILE), content)?;

        Ok(())
    }

    /// List all test categories
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let mut categories = Vec::new();

        if !self.corpus_dir.exists() {
            return Ok(categories);
        }

        for entry in fs::read_dir(&self.corpus_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    categories.push(name.to_string());
                }
            }
        }

        categories.sort();
        Ok(categories)
    }

    /// Get statistics about the corpus
    pub fn get_statistics(&self) -> Result<CorpusStatistics> {
        let tests = self.discover_tests()?;

        let mut stats = CorpusStatistics {
            total_tests: tests.len(),
            ..Default::default()
        };

        for test in tests {
            if test.metadata.enabled {
                stats.enabled_tests += 1;
            } else {
                stats.disabled_tests += 1;
            }
            if !test.expectations.should_succeed {
                stats.error_cases += 1;
            }

            *stats.tests_by_category.entry(test.category).or_insert(0) += 1;
            for tag in test.metadata.tags {
                *stats.tests_by_tag.entry(tag).or_insert(0) += 1;
            }
        }

        Ok(stats)
    }
}

/// Statistics about the test corpus
#[derive(Debug, Default)]
pub struct CorpusStatistics {
    pub total_tests: usize,
    pub enabled_tests: usize,
    pub disabled_tests: usize,
    pub error_cases: usize,
    pub tests_by_category: HashMap<String, usize>,
    pub tests_by_tag: HashMap<String, usize>,
}

impl CorpusStatistics {
    /// Print statistics to stdout
    pub fn print(&self) {
        println!("=== Corpus Statistics ===");
        println!("Total cases: {}", self.total_tests);
        println!("Enabled: {}", self.enabled_tests);
        println!("Disabled: {}", self.disabled_tests);
        println!("Expected failures: {}", self.error_cases);

        if !self.tests_by_category.is_empty() {
            println!("\nCases by category:");
            let mut categories: Vec<_> = self.tests_by_category.iter().collect();
            categories.sort_by_key(|(k, _)| k.as_str());
            for (category, count) in categories {
                println!("  {}: {}", category, count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_corpus_manager_init() {
        let temp_dir = TempDir::new().unwrap();
        let manager = CorpusManager::new(temp_dir.path());

        manager.init_corpus().unwrap();

        assert!(temp_dir.path().join("stages").exists());
        assert!(temp_dir.path().join("errors").exists());
        assert!(temp_dir.path().join("basic/empty-network/test.json").exists());
        assert!(temp_dir.path().join("basic/empty-network/input.xml").exists());
    }

    #[test]
    fn test_discover_tests() {
        let temp_dir = TempDir::new().unwrap();
        let manager = CorpusManager::new(temp_dir.path());
        manager.init_corpus().unwrap();

        let tests = manager.discover_tests().unwrap();
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].id(), "basic/empty-network");
        assert!(tests[0].load_input().unwrap().starts_with(b"<?xml"));

        let stats = manager.get_statistics().unwrap();
        assert_eq!(stats.total_tests, 1);
        assert_eq!(stats.error_cases, 0);
    }

    #[test]
    fn test_filter_by_category() {
        let temp_dir = TempDir::new().unwrap();
        let manager = CorpusManager::new(temp_dir.path());
        manager.init_corpus().unwrap();

        let tests = manager.discover_tests().unwrap();
        assert_eq!(manager.filter_by_category(tests.clone(), "basic").len(), 1);
        assert!(manager.filter_by_category(tests, "stages").is_empty());
    }
}
