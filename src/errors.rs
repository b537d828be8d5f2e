use thiserror::Error;

use crate::implementations::config::ConfigError;
use crate::models::summary::PropertyTestSummary;

/// Errors surfaced at the public boundary of the property engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Property test not found: {0}")]
    TestNotFound(String),

    #[error("Generator not found: {0}")]
    GeneratorNotFound(String),

    #[error("Generator {id} does not produce values of type {expected}")]
    GeneratorTypeMismatch { id: String, expected: String },

    #[error("Generator {generator} faulted while running test {test_id}: {message}")]
    GeneratorFault { test_id: String, generator: String, message: String },

    #[error("Invalid property test {test_id}: {reason}")]
    InvalidTest { test_id: String, reason: String },

    #[error("Invalid reproduction string: {0}")]
    InvalidReproduction(String),

    #[error("Aggregate run aborted at test {test_id} after {completed} completed test(s): {source}")]
    AggregateAborted {
        test_id: String,
        completed: usize,
        #[source]
        source: Box<EngineError>,
        partial: Box<PropertyTestSummary>,
    },

    #[error("Worker task failed for test {test_id}: {message}")]
    TaskFailed { test_id: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type specific to engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error raised by a generator's `generate` call
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct GeneratorError(pub String);

impl GeneratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Error raised from inside an invariant check function
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct CheckError(pub String);

impl CheckError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn recovery_strategy(&self) -> Option<String>;
}

impl RecoverableError for EngineError {
    fn is_recoverable(&self) -> bool {
        match self {
            EngineError::TestNotFound(_)
            | EngineError::GeneratorNotFound(_)
            | EngineError::InvalidReproduction(_) => true,
            EngineError::AggregateAborted { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    fn recovery_strategy(&self) -> Option<String> {
        match self {
            EngineError::TestNotFound(id) =>
                Some(format!("Register test '{}' or run `govprop list` to see known ids", id)),
            EngineError::GeneratorNotFound(id) =>
                Some(format!("Register generator '{}' before the tests that reference it", id)),
            EngineError::GeneratorTypeMismatch { id, .. } =>
                Some(format!("Check that generator '{}' yields the test's input type", id)),
            EngineError::GeneratorFault { generator, .. } =>
                Some(format!("Fix generator '{}'; a faulting generator is a configuration error", generator)),
            EngineError::InvalidReproduction(_) =>
                Some("Paste the reproduction string exactly as reported".to_string()),
            EngineError::AggregateAborted { source, .. } => source.recovery_strategy(),
            _ => None,
        }
    }
}
