use std::collections::BTreeMap;
use std::time::Duration;

use crate::models::common::PropertyCategory;
use crate::models::result::PropertyTestResult;
use crate::models::summary::{ CategorySummary, PropertyCoverage, PropertyTestSummary };

/// Folds per-test results into a summary with coverage statistics
pub struct ResultAggregator;

impl ResultAggregator {
    /// Summarize `results` against a surface of `registered` tests
    pub fn summarize(results: Vec<PropertyTestResult>, registered: usize) -> PropertyTestSummary {
        let executed = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let exercised = results.iter().filter(|r| r.coverage.invariant_checks > 0).count();

        let mut categories: BTreeMap<PropertyCategory, CategorySummary> = BTreeMap::new();
        let mut total_iterations = 0u64;
        let mut total_execution_time = Duration::ZERO;
        let mut counterexamples = Vec::new();

        for result in &results {
            let entry = categories.entry(result.category.clone()).or_default();
            entry.total += 1;
            if result.passed {
                entry.passed += 1;
            } else {
                entry.failed += 1;
            }
            entry.test_ids.push(result.test_id.clone());

            total_iterations += result.iterations as u64;
            total_execution_time += result.execution_time;
            counterexamples.extend(result.counterexamples.iter().cloned());
        }

        let category_distribution = categories
            .iter()
            .map(|(category, summary)| (category.clone(), summary.total))
            .collect();

        PropertyTestSummary {
            registered_tests: registered,
            total_tests: executed,
            passed,
            failed: executed - passed,
            total_iterations,
            total_execution_time,
            categories,
            counterexamples,
            coverage: PropertyCoverage {
                test_coverage: percentage(executed, registered),
                passing_rate: percentage(passed, executed),
                category_distribution,
                invariant_coverage: percentage(exercised, registered),
            },
            results,
            generated_at: chrono::Utc::now(),
        }
    }
}

/// `part / whole * 100`, multiplied first so exact ratios stay exact; 0 for an empty whole
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        ((part as f64) * 100.0) / (whole as f64)
    }
}
