pub mod aggregator_tests;
pub mod registry_tests;
pub mod shrinker_tests;

use std::time::Duration;
use log::info;

use crate::models::common::{ PropertyCategory, Severity };
use crate::models::invariant::{ CheckOutcome, InvariantCheckResult, PropertyInvariant };
use crate::models::result::{ CoverageInfo, PropertyTestResult };

// Setup function to initialize logging
pub fn setup() {
    match env_logger::builder().is_test(true).try_init() {
        Ok(_) => {
            info!("Logger initialized");
        }
        Err(_) => {
            // Logger already initialized, which is fine
        }
    }
}

/// Invariant over integers that holds while `value < bound`
pub fn below(bound: i64) -> PropertyInvariant<i64> {
    PropertyInvariant::new(format!("value stays below {}", bound), Severity::High, move |value: &i64| {
        Ok(
            CheckOutcome::from_checks(
                vec![
                    InvariantCheckResult::expect(
                        "below_bound",
                        *value < bound,
                        format!("{} is not below {}", value, bound),
                        Severity::High
                    )
                        .with_actual(value)
                        .with_constraint(format!("< {}", bound))
                ]
            )
        )
    })
}

/// Hand-built result for aggregation tests
pub fn result(test_id: &str, category: PropertyCategory, passed: bool, checks: usize) -> PropertyTestResult {
    PropertyTestResult {
        test_id: test_id.to_string(),
        name: test_id.to_string(),
        category,
        passed,
        timed_out: false,
        iterations: checks as u32,
        execution_time: Duration::from_millis(5),
        counterexamples: Vec::new(),
        shrinking_steps: 0,
        coverage: CoverageInfo { invariant_checks: checks, ..CoverageInfo::default() },
    }
}
