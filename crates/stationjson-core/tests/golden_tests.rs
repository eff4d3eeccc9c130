//! Golden tests over the shared corpus
//!
//! Each case converts `input.xml` and compares against the reviewed
//! `expected.json`. Run with `UPDATE_GOLDEN=1` to rewrite expected outputs.

use stationjson_golden::{golden_test, GoldenConfig, GoldenTestRunner};

golden_test!(golden_nl_hgn_bhz, "basic/nl-hgn-bhz");
golden_test!(golden_all_payloads, "stages/all-payloads");
golden_test!(golden_sparse_hierarchy, "edge-cases/sparse-hierarchy");
golden_test!(golden_missing_description, "errors/missing-description");
golden_test!(golden_malformed_latitude, "errors/malformed-latitude");
golden_test!(golden_wrong_root, "errors/wrong-root");

/// Run every enabled case in the corpus
#[test]
fn golden_test_suite() {
    let runner = GoldenTestRunner::new(GoldenConfig::from_env());

    match runner.run_batch("*") {
        Ok(results) => println!("All {} golden cases passed", results.len()),
        Err(e) => panic!("Golden cases failed: {}", e),
    }
}

/// Show corpus statistics
#[test]
#[ignore]
fn golden_corpus_stats() {
    let runner = GoldenTestRunner::new(GoldenConfig::from_env());
    runner.print_statistics().expect("Failed to read corpus statistics");
}
