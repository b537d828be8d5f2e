use async_trait::async_trait;

use crate::errors::EngineResult;
use crate::models::common::PropertyCategory;
use crate::models::property::{ PropertyInput, PropertyTest };
use crate::models::result::PropertyTestResult;
use crate::models::summary::PropertyTestSummary;
use crate::traits::generator::PropertyGenerator;

/// Public surface consumed by test runners and the CLI driver
#[async_trait]
pub trait PropertyTestRunner {
    /// Store a generator under its id; a later registration with the same id wins
    fn register_generator<T, G>(&mut self, generator: G)
        where T: 'static, G: PropertyGenerator<T> + 'static;

    /// Store a test under its id; a later registration with the same id wins
    fn register_test<T: PropertyInput>(&mut self, test: PropertyTest<T>) -> EngineResult<()>;

    /// Run one test to its first counterexample, iteration bound or timeout
    async fn execute_test(&self, test_id: &str) -> EngineResult<PropertyTestResult>;

    /// Run every test registered under `category`
    async fn execute_category(
        &self,
        category: &PropertyCategory
    ) -> EngineResult<Vec<PropertyTestResult>>;

    /// Run every registered test and summarize
    async fn execute_all(&self) -> EngineResult<PropertyTestSummary>;
}
