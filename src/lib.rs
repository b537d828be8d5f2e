pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ EngineOptions, ExecutionConfig };
pub use errors::{ CheckError, EngineError, EngineResult, GeneratorError, RecoverableError };
pub use implementations::config::EngineConfig;
pub use implementations::engine::PropertyEngine;
pub use implementations::generators::{
    FnGenerator,
    IntRangeGenerator,
    OneOfGenerator,
    StringGenerator,
    VecGenerator,
};
pub use models::{
    common::{
        GeneratorConstraints,
        GeneratorInfo,
        PropertyCategory,
        Severity,
        ShrinkMode,
        TestInfo,
    },
    invariant::{
        CheckOutcome,
        InvariantCheckResult,
        PropertyInvariant,
    },
    property::{
        PropertyInput,
        PropertyTest,
        ShrinkPolicy,
        ShrinkingStrategy,
    },
    result::{
        CoverageInfo,
        PropertyCounterExample,
        PropertyResult,
        PropertyTestResult,
        ReplayReport,
    },
    summary::{
        CategorySummary,
        PropertyCoverage,
        PropertyTestSummary,
    },
};
pub use traits::{
    InvariantCheck,
    PropertyGenerator,
    PropertyTestRunner,
};
