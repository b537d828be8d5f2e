pub mod common;
pub mod invariant;
pub mod property;
pub mod result;
pub mod summary;

// Re-export common model types
pub use common::{ PropertyCategory, Severity, ShrinkMode };
pub use invariant::{ CheckOutcome, InvariantCheckResult, PropertyInvariant };
pub use property::{ PropertyInput, PropertyTest, ShrinkPolicy, ShrinkingStrategy };
pub use result::{ PropertyCounterExample, PropertyResult, PropertyTestResult };
pub use summary::{ PropertyCoverage, PropertyTestSummary };
