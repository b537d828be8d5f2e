use std::time::Instant;
use log::debug;

use crate::config::ExecutionConfig;
use crate::implementations::evaluator::InvariantEvaluator;
use crate::models::property::{ PropertyInput, PropertyTest, ShrinkPolicy, ShrinkingStrategy };
use crate::models::result::PropertyResult;
use crate::traits::generator::PropertyGenerator;

/// Locally-minimal failing result and the number of accepted shrink steps
#[derive(Debug, Clone)]
pub struct ShrinkOutcome<T> {
    pub minimized: PropertyResult<T>,
    pub steps_taken: usize,
}

/// Greedy single-candidate descent over generator-proposed candidates.
///
/// The first failing candidate replaces the current input and the scan
/// restarts; descent stops when no candidate fails, when the step bound
/// (the smaller of the strategy's and the config's) is reached, or when the
/// optional shrink timeout elapses. The result is a local minimum only.
pub struct Shrinker;

impl Shrinker {
    pub async fn shrink<T: PropertyInput>(
        test: &PropertyTest<T>,
        generator: &dyn PropertyGenerator<T>,
        failing: PropertyResult<T>,
        strategy: &ShrinkingStrategy<T>,
        config: &ExecutionConfig
    ) -> ShrinkOutcome<T> {
        let max_steps = strategy.max_steps.min(config.max_shrink_steps);
        let deadline = config.shrink_timeout();
        let started = Instant::now();

        let mut current = failing;
        let mut steps_taken = 0;

        'descent: while steps_taken < max_steps {
            if let Some(limit) = deadline {
                if started.elapsed() >= limit {
                    debug!("Shrink timeout reached for '{}' after {} step(s)", test.id, steps_taken);
                    break;
                }
            }

            let candidates = Self::candidates(generator, &strategy.policy, &current.input);
            let current_value = serde_json::to_value(&current.input).ok();

            for candidate in candidates {
                if current_value.is_some() && serde_json::to_value(&candidate).ok() == current_value {
                    continue;
                }

                let evaluation = InvariantEvaluator::check(
                    &test.invariant,
                    candidate,
                    current.metadata.iteration,
                    current.metadata.seed
                ).await;

                if let Some(mut result) = evaluation.into_failure() {
                    result.metadata.memory_kb = current.metadata.memory_kb;
                    current = result;
                    steps_taken += 1;
                    continue 'descent;
                }
            }

            break;
        }

        debug!("Shrinking '{}' finished after {} step(s)", test.id, steps_taken);
        ShrinkOutcome { minimized: current, steps_taken }
    }

    fn candidates<T>(
        generator: &dyn PropertyGenerator<T>,
        policy: &ShrinkPolicy<T>,
        value: &T
    ) -> Vec<T> {
        match policy {
            ShrinkPolicy::Custom(candidates) => candidates(value),
            policy =>
                policy
                    .mode()
                    .and_then(|mode| generator.shrink(value, mode))
                    .unwrap_or_default(),
        }
    }
}
