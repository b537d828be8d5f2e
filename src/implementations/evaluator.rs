use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use futures::FutureExt;
use log::{ debug, warn };

use crate::errors::CheckError;
use crate::models::invariant::{ CheckOutcome, InvariantCheckResult, PropertyInvariant };
use crate::models::property::PropertyInput;
use crate::models::result::{ PropertyResult, ResultMetadata };

/// Name of the single sub-check reported when a check function faults
pub const CHECK_FAULT: &str = "check_fault";

/// Result of running an invariant against one input
#[derive(Debug, Clone)]
pub enum Evaluation<T> {
    /// A precondition rejected the input; neither a pass nor a failure
    Skipped { precondition: String },
    Evaluated(PropertyResult<T>),
}

impl<T> Evaluation<T> {
    /// The evaluated result when the invariant was violated
    pub fn into_failure(self) -> Option<PropertyResult<T>> {
        match self {
            Evaluation::Evaluated(result) if !result.success => Some(result),
            _ => None,
        }
    }
}

enum Checked {
    Skipped(String),
    Done(CheckOutcome),
}

/// Wraps user check functions with precondition filtering, postconditions and fault capture
pub struct InvariantEvaluator;

impl InvariantEvaluator {
    pub async fn check<T: PropertyInput>(
        invariant: &PropertyInvariant<T>,
        input: T,
        iteration: u32,
        seed: Option<u64>
    ) -> Evaluation<T> {
        let started = Instant::now();
        let checked = AssertUnwindSafe(Self::run(invariant, &input)).catch_unwind().await;

        let (outcome, error) = match checked {
            Ok(Ok(Checked::Skipped(precondition))) => {
                debug!("Input skipped by precondition '{}'", precondition);
                return Evaluation::Skipped { precondition };
            }
            Ok(Ok(Checked::Done(outcome))) => (outcome, None),
            Ok(Err(e)) => {
                warn!("Invariant check returned an error: {}", e);
                (Self::fault_outcome(invariant, &e.0), Some(e.0))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Invariant check panicked: {}", message);
                (Self::fault_outcome(invariant, &message), Some(message))
            }
        };

        let success = outcome.passed();
        Evaluation::Evaluated(PropertyResult {
            success,
            input,
            output: outcome.output,
            error,
            checks: outcome.checks,
            metadata: ResultMetadata {
                execution_time: started.elapsed(),
                memory_kb: None,
                iteration,
                seed,
            },
        })
    }

    async fn run<T: PropertyInput>(
        invariant: &PropertyInvariant<T>,
        input: &T
    ) -> Result<Checked, CheckError> {
        for precondition in invariant.preconditions() {
            if !(precondition.predicate)(input) {
                return Ok(Checked::Skipped(precondition.name.clone()));
            }
        }

        let mut outcome = invariant.check.check(input).await?;

        for postcondition in invariant.postconditions() {
            let held = (postcondition.predicate)(input, &outcome);
            outcome.checks.push(
                InvariantCheckResult::expect(
                    postcondition.name.clone(),
                    held,
                    format!("postcondition '{}' does not hold", postcondition.name),
                    postcondition.severity
                )
            );
        }

        Ok(Checked::Done(outcome))
    }

    fn fault_outcome<T>(invariant: &PropertyInvariant<T>, message: &str) -> CheckOutcome {
        CheckOutcome::from_checks(
            vec![
                InvariantCheckResult::fail(
                    CHECK_FAULT,
                    format!("check function faulted: {}", message),
                    invariant.severity
                )
            ]
        )
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
