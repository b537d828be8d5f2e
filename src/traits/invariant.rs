use async_trait::async_trait;

use crate::errors::CheckError;
use crate::models::invariant::CheckOutcome;

/// A check function evaluated against one generated input.
///
/// Implementations may suspend (I/O-backed checks); the engine awaits each
/// call before drawing the next input. Returning `Err` or panicking is a
/// check fault and is reported as a failing result, never propagated.
#[async_trait]
pub trait InvariantCheck<T>: Send + Sync {
    async fn check(&self, input: &T) -> Result<CheckOutcome, CheckError>;
}

/// Adapter turning a synchronous closure into an `InvariantCheck`
pub struct FnCheck<F> {
    check: F,
}

impl<F> FnCheck<F> {
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

#[async_trait]
impl<T, F> InvariantCheck<T>
    for FnCheck<F>
    where T: Send + Sync, F: Fn(&T) -> Result<CheckOutcome, CheckError> + Send + Sync
{
    async fn check(&self, input: &T) -> Result<CheckOutcome, CheckError> {
        (self.check)(input)
    }
}
