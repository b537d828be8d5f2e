use rand::rngs::StdRng;

use crate::errors::GeneratorError;
use crate::models::common::{ GeneratorConstraints, GeneratorInfo, ShrinkMode };

/// Trait for pluggable producers of random domain values
pub trait PropertyGenerator<T>: Send + Sync {
    /// Registry key
    fn id(&self) -> &str;

    /// Human readable name
    fn name(&self) -> &str {
        self.id()
    }

    /// Tag describing the produced type, for listings
    fn type_tag(&self) -> &str;

    /// Produce a fresh value from the supplied random source.
    ///
    /// An `Err` here is a generator fault: it aborts the run instead of
    /// being reported as a counterexample.
    fn generate(&self, rng: &mut StdRng) -> Result<T, GeneratorError>;

    /// Propose candidates no larger than `value`, most reduced first.
    ///
    /// `None` means the generator declares no shrink behaviour; an empty
    /// list means `value` is already minimal.
    fn shrink(&self, _value: &T, _mode: ShrinkMode) -> Option<Vec<T>> {
        None
    }

    /// Advisory constraints; never enforced by the engine
    fn constraints(&self) -> Option<GeneratorConstraints> {
        None
    }

    /// Whether `value` sits on a boundary worth counting in coverage
    fn is_edge_case(&self, _value: &T) -> bool {
        false
    }

    fn info(&self) -> GeneratorInfo {
        GeneratorInfo {
            id: self.id().to_string(),
            name: self.name().to_string(),
            type_tag: self.type_tag().to_string(),
            constraints: self.constraints(),
        }
    }
}
