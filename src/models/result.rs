use std::time::Duration;
use serde::{ Deserialize, Serialize };

use crate::models::common::PropertyCategory;
use crate::models::invariant::InvariantCheckResult;

/// Metadata recorded for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub execution_time: Duration,
    /// Resident memory in KiB, when the platform exposes it
    pub memory_kb: Option<u64>,
    pub iteration: u32,
    pub seed: Option<u64>,
}

/// Outcome of evaluating an invariant against one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyResult<T> {
    pub success: bool,
    pub input: T,
    pub output: Option<serde_json::Value>,
    pub error: Option<String>,
    pub checks: Vec<InvariantCheckResult>,
    pub metadata: ResultMetadata,
}

impl<T> PropertyResult<T> {
    pub fn failed_checks(&self) -> impl Iterator<Item = &InvariantCheckResult> {
        self.checks.iter().filter(|check| !check.passed)
    }

    /// Error text for a failed result: the attached error, else the failed sub-checks
    pub fn failure_reason(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        self.failed_checks()
            .map(|check| {
                if check.message.is_empty() {
                    check.name.clone()
                } else {
                    format!("{}: {}", check.name, check.message)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A concrete failing input, possibly shrunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCounterExample {
    pub test_id: String,
    pub input: serde_json::Value,
    /// The input as first drawn, before shrinking
    pub original_input: serde_json::Value,
    pub error: String,
    pub failed_checks: Vec<InvariantCheckResult>,
    pub shrunk: bool,
    pub shrink_steps: usize,
    pub discovered_at: chrono::DateTime<chrono::Utc>,
    pub seed: Option<u64>,
    /// Self-contained string accepted by `PropertyEngine::replay`
    pub reproduction: String,
}

/// Coverage counters gathered during one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageInfo {
    /// Distinct (sub-check, outcome) pairs observed
    pub branches_covered: usize,
    /// Inputs the generator flagged as boundary values
    pub edge_cases_covered: usize,
    /// Evaluations that were not skipped by a precondition
    pub invariant_checks: usize,
    pub skipped_inputs: usize,
}

/// Per-test rollup of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTestResult {
    pub test_id: String,
    pub name: String,
    pub category: PropertyCategory,
    pub passed: bool,
    pub timed_out: bool,
    pub iterations: u32,
    pub execution_time: Duration,
    pub counterexamples: Vec<PropertyCounterExample>,
    pub shrinking_steps: usize,
    pub coverage: CoverageInfo,
}

/// Payload of a reproduction string: the test, the iteration seed and the exact failing input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reproduction {
    pub test_id: String,
    pub seed: Option<u64>,
    pub input: serde_json::Value,
}

impl Reproduction {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(reproduction: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(reproduction.trim())
    }
}

/// Outcome of re-running a reproduction string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub test_id: String,
    pub input: serde_json::Value,
    /// The pre-shrink draw regenerated from the recorded seed
    pub original_input: Option<serde_json::Value>,
    /// True when the input still violates the invariant
    pub reproduced: bool,
    /// Precondition that rejected the input, if any
    pub skipped_by: Option<String>,
    pub checks: Vec<InvariantCheckResult>,
    pub error: Option<String>,
}
