//! Golden test runner for corpus cases

use crate::{
    corpus::{CorpusManager, TestCase, CASE_FILE},
    diff::DiffEngine,
    snapshot::{apply_ignores, SnapshotManager},
    GoldenConfig, GoldenError, Result,
};
use colored::*;
use regex::Regex;
use serde_json::Value;
use stationjson_core::Transformer;
use stationjson_schemas::{create_station_json_validator, SchemaValidator};
use std::time::Instant;

/// Shape of the `created` stamp every conversion writes
const CREATED_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$";

/// Result of running a golden test
#[derive(Debug)]
pub struct TestResult {
    /// `category/name` of the case
    pub name: String,

    /// Whether the test passed
    pub passed: bool,

    /// Error message if failed
    pub error: Option<String>,

    /// Diff output if comparison failed
    pub diff: Option<String>,

    /// Execution time in milliseconds
    pub duration_ms: u64,

    /// Whether `expected.json` was written
    pub updated: bool,
}

impl TestResult {
    /// Print the test result
    pub fn print(&self, verbose: bool) {
        let status = if self.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("{} {} ({}ms)", status, self.name, self.duration_ms);

        if let Some(ref error) = self.error {
            println!("  {}: {}", "Error".red(), error);
        }

        if verbose || !self.passed {
            if let Some(ref diff) = self.diff {
                println!("{}", diff);
            }
        }

        if self.updated {
            println!("  {}", "Expected output updated".yellow());
        }
    }
}

/// Outcome of one case before timing is attached
struct Outcome {
    passed: bool,
    error: Option<String>,
    diff: Option<String>,
    updated: bool,
}

impl Outcome {
    fn pass() -> Self {
        Self {
            passed: true,
            error: None,
            diff: None,
            updated: false,
        }
    }

    fn fail(error: impl Into<String>) -> Self {
        Self {
            passed: false,
            error: Some(error.into()),
            diff: None,
            updated: false,
        }
    }
}

/// Runner for golden tests
pub struct GoldenTestRunner {
    config: GoldenConfig,
    corpus_manager: CorpusManager,
    snapshot_manager: SnapshotManager,
}

impl GoldenTestRunner {
    /// Create a new test runner
    pub fn new(config: GoldenConfig) -> Self {
        let corpus_manager = CorpusManager::new(&config.corpus_dir);
        let snapshot_manager = SnapshotManager::new(&config.corpus_dir);

        Self {
            config,
            corpus_manager,
            snapshot_manager,
        }
    }

    /// Run a single case by id (`category/name`)
    pub fn run_test(&self, case_id: &str) -> Result<TestResult> {
        let test_path = self.config.corpus_dir.join(case_id).join(CASE_FILE);
        let test_case = self.corpus_manager.load_test_case(&test_path)?;

        let test_result = self.run_case(&test_case);

        if self.config.verbose {
            test_result.print(true);
        }

        if test_result.passed {
            Ok(test_result)
        } else {
            Err(GoldenError::TestFailed(format!(
                "Case '{}' failed: {}",
                case_id,
                test_result.error.as_deref().unwrap_or("unknown error")
            )))
        }
    }

    /// Run every case whose id contains `pattern` (`*` selects all)
    pub fn run_batch(&self, pattern: &str) -> Result<Vec<TestResult>> {
        let tests = self.corpus_manager.discover_tests()?;

        let filtered_tests: Vec<_> = if pattern == "*" {
            tests
        } else {
            tests.into_iter().filter(|t| t.id().contains(pattern)).collect()
        };

        if filtered_tests.is_empty() {
            return Err(GoldenError::CorpusError(format!(
                "No cases found matching pattern '{}'",
                pattern
            )));
        }

        println!("Running {} cases...\n", filtered_tests.len());

        let mut results = Vec::with_capacity(filtered_tests.len());
        let mut failed = 0;

        for test_case in &filtered_tests {
            let result = self.run_case(test_case);
            if !result.passed {
                failed += 1;
            }
            result.print(self.config.verbose);
            results.push(result);
        }

        println!("\n{}", "=== Golden Summary ===".bold());
        println!(
            "{}: {} passed, {} failed",
            "Results".bold(),
            (results.len() - failed).to_string().green(),
            failed.to_string().red()
        );

        if failed > 0 {
            Err(GoldenError::TestFailed(format!("{} case(s) failed", failed)))
        } else {
            Ok(results)
        }
    }

    fn run_case(&self, test_case: &TestCase) -> TestResult {
        let start = Instant::now();

        let outcome = if test_case.metadata.enabled {
            self.execute_test(test_case)
                .unwrap_or_else(|e| Outcome::fail(e.to_string()))
        } else {
            Outcome::pass()
        };

        TestResult {
            name: test_case.id(),
            passed: outcome.passed,
            error: outcome.error,
            diff: outcome.diff,
            duration_ms: start.elapsed().as_millis() as u64,
            updated: outcome.updated,
        }
    }

    /// Execute a single enabled case
    fn execute_test(&self, test_case: &TestCase) -> Result<Outcome> {
        let input = test_case.load_input()?;

        let mut transformer = Transformer::new();
        if let Some(module) = &test_case.module {
            transformer = transformer.with_module(module.clone());
        }

        let converted = transformer.convert(&input);

        if !test_case.expectations.should_succeed {
            return self.check_failure(test_case, converted.map(|_| ()));
        }

        let document = match converted {
            Ok(document) => document,
            Err(e) => return Ok(Outcome::fail(format!("Conversion failed: {}", e))),
        };
        let actual = serde_json::to_value(&document)?;

        if self.config.validate_schema {
            self.validate(&actual)?;
        }

        let case_id = test_case.id();

        if !self.snapshot_manager.exists(&case_id) {
            if self.config.create_missing || self.config.update_snapshots {
                self.snapshot_manager.save(&case_id, &actual)?;
                return Ok(Outcome {
                    updated: true,
                    ..Outcome::pass()
                });
            }
            return Err(GoldenError::SnapshotMismatch(format!(
                "Expected output for '{}' does not exist. Run with UPDATE_GOLDEN=1 to create it.",
                case_id
            )));
        }

        let mut expected = self.snapshot_manager.load(&case_id)?;

        let mut diff_engine = DiffEngine::new(self.config.diff_options.clone());
        diff_engine.add_volatile_pattern("created", CREATED_PATTERN)?;
        for volatile in &test_case.expectations.volatile_fields {
            diff_engine.add_volatile_pattern(&volatile.path, &volatile.pattern)?;
        }

        let mut compared = actual.clone();
        apply_ignores(&mut expected, &test_case.expectations.ignore_fields);
        apply_ignores(&mut compared, &test_case.expectations.ignore_fields);

        let diff_result = diff_engine.compare(&expected, &compared);

        if diff_result.matches {
            Ok(Outcome::pass())
        } else if self.config.update_snapshots {
            self.snapshot_manager.backup(&case_id)?;
            self.snapshot_manager.save(&case_id, &actual)?;
            Ok(Outcome {
                diff: Some(diff_result.diff_output),
                updated: true,
                ..Outcome::pass()
            })
        } else {
            Ok(Outcome {
                diff: Some(diff_result.diff_output),
                ..Outcome::fail(format!(
                    "Output differs at: {}",
                    diff_result.differing_paths.join(", ")
                ))
            })
        }
    }

    /// A case expected to fail passes when conversion fails with a matching message
    fn check_failure(
        &self,
        test_case: &TestCase,
        converted: stationjson_core::Result<()>,
    ) -> Result<Outcome> {
        let error = match converted {
            Ok(()) => return Ok(Outcome::fail("Conversion succeeded but a failure was expected")),
            Err(e) => e.to_string(),
        };

        if let Some(pattern) = &test_case.expectations.error_pattern {
            let regex = Regex::new(pattern)
                .map_err(|e| GoldenError::CorpusError(format!("Invalid error_pattern: {}", e)))?;
            if !regex.is_match(&error) {
                return Ok(Outcome::fail(format!(
                    "Error '{}' does not match pattern '{}'",
                    error, pattern
                )));
            }
        }

        Ok(Outcome::pass())
    }

    fn validate(&self, actual: &Value) -> Result<()> {
        let validator = create_station_json_validator()
            .map_err(|e| GoldenError::CorpusError(format!("Cannot build schema validator: {}", e)))?;

        validator
            .validate(actual)
            .map_err(|e| GoldenError::TestFailed(format!("Output violates schema: {}", e)))
    }

    /// Initialize the corpus with a sample case
    pub fn init_corpus(&self) -> Result<()> {
        self.corpus_manager.init_corpus()
    }

    /// List all available cases
    pub fn list_tests(&self) -> Result<Vec<String>> {
        let tests = self.corpus_manager.discover_tests()?;
        Ok(tests.iter().map(TestCase::id).collect())
    }

    /// Print corpus statistics
    pub fn print_statistics(&self) -> Result<()> {
        let stats = self.corpus_manager.get_statistics()?;
        stats.print();
        Ok(())
    }
}
