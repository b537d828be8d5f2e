use std::collections::BTreeMap;
use std::time::Duration;
use serde::{ Deserialize, Serialize };

use crate::models::common::PropertyCategory;
use crate::models::result::{ PropertyCounterExample, PropertyTestResult };

/// Pass/fail counts for one category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub test_ids: Vec<String>,
}

/// Coverage statistics over the registered test surface, in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyCoverage {
    pub test_coverage: f64,
    pub passing_rate: f64,
    pub category_distribution: BTreeMap<PropertyCategory, usize>,
    pub invariant_coverage: f64,
}

/// Cross-test rollup of an aggregate run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTestSummary {
    pub registered_tests: usize,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub total_iterations: u64,
    pub total_execution_time: Duration,
    pub categories: BTreeMap<PropertyCategory, CategorySummary>,
    pub counterexamples: Vec<PropertyCounterExample>,
    pub coverage: PropertyCoverage,
    pub results: Vec<PropertyTestResult>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl PropertyTestSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
