pub mod generator;
pub mod invariant;
pub mod property_system;

// Re-export traits
pub use generator::PropertyGenerator;
pub use invariant::{ FnCheck, InvariantCheck };
pub use property_system::PropertyTestRunner;
