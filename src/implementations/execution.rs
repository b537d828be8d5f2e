use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use log::{ debug, error, info };
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ExecutionConfig;
use crate::errors::{ EngineError, EngineResult };
use crate::implementations::evaluator::{ Evaluation, InvariantEvaluator };
use crate::implementations::shrinker::Shrinker;
use crate::models::property::{ PropertyInput, PropertyTest };
use crate::models::result::{
    CoverageInfo,
    PropertyCounterExample,
    PropertyResult,
    PropertyTestResult,
    Reproduction,
};
use crate::traits::generator::PropertyGenerator;

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Running,
    AllPassed,
    FoundFailure,
    Shrinking,
    TimedOut,
    Completed,
}

/// State owned by one `execute_test` call; discarded once the result is returned
pub struct PropertyTestExecution<T> {
    test: Arc<PropertyTest<T>>,
    generator: Arc<dyn PropertyGenerator<T>>,
    config: ExecutionConfig,
    state: ExecutionState,
    counterexamples: Vec<PropertyCounterExample>,
    iterations: u32,
    shrinking_steps: usize,
    coverage: CoverageInfo,
    branches: HashSet<(String, bool)>,
}

impl<T: PropertyInput> PropertyTestExecution<T> {
    pub fn new(
        test: Arc<PropertyTest<T>>,
        generator: Arc<dyn PropertyGenerator<T>>,
        config: ExecutionConfig
    ) -> Self {
        Self {
            test,
            generator,
            config,
            state: ExecutionState::Idle,
            counterexamples: Vec::new(),
            iterations: 0,
            shrinking_steps: 0,
            coverage: CoverageInfo::default(),
            branches: HashSet::new(),
        }
    }

    fn transition(&mut self, next: ExecutionState) {
        debug!("Test '{}': {:?} -> {:?}", self.test.id, self.state, next);
        self.state = next;
    }

    /// Drive generate -> check -> shrink until the first failure, the
    /// iteration bound, or the timeout. A generator error aborts the run.
    pub async fn run(&mut self) -> EngineResult<PropertyTestResult> {
        self.transition(ExecutionState::Running);

        let started = Instant::now();
        let timeout = self.config.timeout();
        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        let mut timed_out = false;

        for index in 0..self.config.iterations {
            if started.elapsed() >= timeout {
                info!(
                    "Test '{}' timed out after {} of {} iterations",
                    self.test.id,
                    self.iterations,
                    self.config.iterations
                );
                timed_out = true;
                self.transition(ExecutionState::TimedOut);
                break;
            }

            self.iterations += 1;
            let seed = base_seed.wrapping_add(index as u64);
            let mut rng = StdRng::seed_from_u64(seed);

            let input = match self.generator.generate(&mut rng) {
                Ok(input) => input,
                Err(e) => {
                    error!("Generator '{}' faulted in test '{}': {}", self.generator.id(), self.test.id, e);
                    return Err(EngineError::GeneratorFault {
                        test_id: self.test.id.clone(),
                        generator: self.generator.id().to_string(),
                        message: e.to_string(),
                    });
                }
            };
            let edge_case = self.generator.is_edge_case(&input);

            let evaluation = InvariantEvaluator::check(&self.test.invariant, input, index, Some(seed)).await;
            let mut result = match evaluation {
                Evaluation::Skipped { .. } => {
                    self.coverage.skipped_inputs += 1;
                    continue;
                }
                Evaluation::Evaluated(result) => result,
            };
            // One snapshot per iteration; shrink candidates inherit it
            result.metadata.memory_kb = resident_memory_kb();

            self.record_coverage(&result, edge_case);

            if !result.success {
                self.transition(ExecutionState::FoundFailure);
                let counterexample = self.build_counterexample(result).await?;
                info!(
                    "Test '{}' failed at iteration {}: {}",
                    self.test.id,
                    index,
                    counterexample.error
                );
                self.counterexamples.push(counterexample);
                self.transition(ExecutionState::Completed);
                return Ok(self.finish(false, false, started));
            }
        }

        if !timed_out {
            self.transition(ExecutionState::AllPassed);
        }
        self.transition(ExecutionState::Completed);
        Ok(self.finish(true, timed_out, started))
    }

    fn record_coverage(&mut self, result: &PropertyResult<T>, edge_case: bool) {
        self.coverage.invariant_checks += 1;
        if edge_case {
            self.coverage.edge_cases_covered += 1;
        }
        for check in &result.checks {
            self.branches.insert((check.name.clone(), check.passed));
        }
        self.coverage.branches_covered = self.branches.len();
    }

    async fn build_counterexample(
        &mut self,
        failing: PropertyResult<T>
    ) -> EngineResult<PropertyCounterExample> {
        let original_input = serde_json::to_value(&failing.input)?;

        let (minimized, steps_taken) = if self.config.shrinking_enabled {
            self.transition(ExecutionState::Shrinking);
            let outcome = Shrinker::shrink(
                &self.test,
                self.generator.as_ref(),
                failing,
                &self.test.shrinking,
                &self.config
            ).await;
            (outcome.minimized, outcome.steps_taken)
        } else {
            (failing, 0)
        };
        self.shrinking_steps = steps_taken;

        let input = serde_json::to_value(&minimized.input)?;
        let reproduction = (Reproduction {
            test_id: self.test.id.clone(),
            seed: minimized.metadata.seed,
            input: input.clone(),
        }).encode()?;

        Ok(PropertyCounterExample {
            test_id: self.test.id.clone(),
            input,
            original_input,
            error: minimized.failure_reason(),
            failed_checks: minimized.failed_checks().cloned().collect(),
            shrunk: steps_taken > 0,
            shrink_steps: steps_taken,
            discovered_at: chrono::Utc::now(),
            seed: minimized.metadata.seed,
            reproduction,
        })
    }

    fn finish(&mut self, passed: bool, timed_out: bool, started: Instant) -> PropertyTestResult {
        PropertyTestResult {
            test_id: self.test.id.clone(),
            name: self.test.name.clone(),
            category: self.test.category.clone(),
            passed,
            timed_out,
            iterations: self.iterations,
            execution_time: started.elapsed(),
            counterexamples: std::mem::take(&mut self.counterexamples),
            shrinking_steps: self.shrinking_steps,
            coverage: self.coverage.clone(),
        }
    }
}

/// Resident set size of this process in KiB, from procfs on Linux
pub(crate) fn resident_memory_kb() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse().ok())
}
