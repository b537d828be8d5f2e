pub mod aggregator;
pub mod config;
pub mod engine;
pub mod evaluator;
pub mod execution;
pub mod generators;
pub mod registry;
pub mod shrinker;
