use std::fmt::Debug;
use std::sync::Arc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ExecutionConfig;
use crate::models::common::{ PropertyCategory, ShrinkMode, TestInfo };
use crate::models::invariant::PropertyInvariant;

/// Bounds every generated input type must satisfy
pub trait PropertyInput: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> PropertyInput for T where T: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {}

pub type ShrinkFn<T> = Arc<dyn Fn(&T) -> Vec<T> + Send + Sync>;

/// How shrink candidates are produced
pub enum ShrinkPolicy<T> {
    Minimal,
    Linear,
    Binary,
    /// Bypasses the generator's own shrink behaviour
    Custom(ShrinkFn<T>),
}

impl<T> Clone for ShrinkPolicy<T> {
    fn clone(&self) -> Self {
        match self {
            ShrinkPolicy::Minimal => ShrinkPolicy::Minimal,
            ShrinkPolicy::Linear => ShrinkPolicy::Linear,
            ShrinkPolicy::Binary => ShrinkPolicy::Binary,
            ShrinkPolicy::Custom(candidates) => ShrinkPolicy::Custom(Arc::clone(candidates)),
        }
    }
}

impl<T> ShrinkPolicy<T> {
    /// The mode handed to a generator, or `None` for a custom policy
    pub fn mode(&self) -> Option<ShrinkMode> {
        match self {
            ShrinkPolicy::Minimal => Some(ShrinkMode::Minimal),
            ShrinkPolicy::Linear => Some(ShrinkMode::Linear),
            ShrinkPolicy::Binary => Some(ShrinkMode::Binary),
            ShrinkPolicy::Custom(_) => None,
        }
    }
}

pub struct ShrinkingStrategy<T> {
    pub policy: ShrinkPolicy<T>,
    pub max_steps: usize,
}

impl<T> Clone for ShrinkingStrategy<T> {
    fn clone(&self) -> Self {
        Self { policy: self.policy.clone(), max_steps: self.max_steps }
    }
}

impl<T> Default for ShrinkingStrategy<T> {
    fn default() -> Self {
        Self { policy: ShrinkPolicy::Binary, max_steps: 100 }
    }
}

impl<T> ShrinkingStrategy<T> {
    pub fn new(policy: ShrinkPolicy<T>, max_steps: usize) -> Self {
        Self { policy, max_steps }
    }

    pub fn custom<F>(max_steps: usize, candidates: F) -> Self
        where F: Fn(&T) -> Vec<T> + Send + Sync + 'static
    {
        Self { policy: ShrinkPolicy::Custom(Arc::new(candidates)), max_steps }
    }
}

/// A registered property: one invariant checked against generated inputs
pub struct PropertyTest<T> {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PropertyCategory,
    pub invariant: PropertyInvariant<T>,
    /// First entry is the primary input source
    pub generators: Vec<String>,
    pub shrinking: ShrinkingStrategy<T>,
    /// Documentation only, never executed
    pub examples: Vec<T>,
    /// Documentation only, never executed
    pub counterexamples: Vec<T>,
    pub config: ExecutionConfig,
}

impl<T: PropertyInput> PropertyTest<T> {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: PropertyCategory,
        generator_id: impl Into<String>,
        invariant: PropertyInvariant<T>
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: invariant.description.clone(),
            category,
            invariant,
            generators: vec![generator_id.into()],
            shrinking: ShrinkingStrategy::default(),
            examples: Vec::new(),
            counterexamples: Vec::new(),
            config: ExecutionConfig::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a secondary generator available to composing generators
    pub fn with_generator(mut self, generator_id: impl Into<String>) -> Self {
        self.generators.push(generator_id.into());
        self
    }

    pub fn with_shrinking(mut self, shrinking: ShrinkingStrategy<T>) -> Self {
        self.shrinking = shrinking;
        self
    }

    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_example(mut self, example: T) -> Self {
        self.examples.push(example);
        self
    }

    pub fn with_counterexample(mut self, counterexample: T) -> Self {
        self.counterexamples.push(counterexample);
        self
    }

    pub fn primary_generator(&self) -> Option<&str> {
        self.generators.first().map(String::as_str)
    }

    pub fn info(&self) -> TestInfo {
        TestInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            generators: self.generators.clone(),
            severity: self.invariant.severity,
        }
    }
}
