use std::sync::Arc;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use log::{ debug, error, info, warn };
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ EngineOptions, ExecutionConfig };
use crate::errors::{ EngineError, EngineResult };
use crate::implementations::aggregator::ResultAggregator;
use crate::implementations::evaluator::{ Evaluation, InvariantEvaluator };
use crate::implementations::execution::PropertyTestExecution;
use crate::implementations::registry::GeneratorRegistry;
use crate::models::common::{ GeneratorInfo, PropertyCategory, TestInfo };
use crate::models::property::{ PropertyInput, PropertyTest };
use crate::models::result::{ PropertyTestResult, ReplayReport, Reproduction };
use crate::models::summary::PropertyTestSummary;
use crate::traits::generator::PropertyGenerator;
use crate::traits::property_system::PropertyTestRunner;

type PreparedRun = BoxFuture<'static, EngineResult<PropertyTestResult>>;

/// Type-erased view of a registered `PropertyTest<T>`
#[async_trait]
trait RegisteredTest: Send + Sync {
    fn info(&self) -> TestInfo;

    fn id(&self) -> &str;

    fn category(&self) -> &PropertyCategory;

    fn config(&self) -> &ExecutionConfig;

    /// Resolve the primary generator and build a self-contained run
    fn prepare(
        &self,
        generators: &GeneratorRegistry,
        config: ExecutionConfig
    ) -> EngineResult<PreparedRun>;

    async fn replay(
        &self,
        generators: &GeneratorRegistry,
        reproduction: Reproduction
    ) -> EngineResult<ReplayReport>;
}

struct TypedTest<T> {
    test: Arc<PropertyTest<T>>,
}

impl<T: PropertyInput> TypedTest<T> {
    fn primary(&self) -> EngineResult<&str> {
        self.test.primary_generator().ok_or_else(|| EngineError::InvalidTest {
            test_id: self.test.id.clone(),
            reason: "no generator configured".to_string(),
        })
    }
}

#[async_trait]
impl<T: PropertyInput> RegisteredTest for TypedTest<T> {
    fn info(&self) -> TestInfo {
        self.test.info()
    }

    fn id(&self) -> &str {
        &self.test.id
    }

    fn category(&self) -> &PropertyCategory {
        &self.test.category
    }

    fn config(&self) -> &ExecutionConfig {
        &self.test.config
    }

    fn prepare(
        &self,
        generators: &GeneratorRegistry,
        config: ExecutionConfig
    ) -> EngineResult<PreparedRun> {
        let generator = generators.get::<T>(self.primary()?)?;
        let mut execution = PropertyTestExecution::new(Arc::clone(&self.test), generator, config);
        Ok(async move { execution.run().await }.boxed())
    }

    async fn replay(
        &self,
        generators: &GeneratorRegistry,
        reproduction: Reproduction
    ) -> EngineResult<ReplayReport> {
        let input: T = serde_json::from_value(reproduction.input.clone()).map_err(|e| {
            EngineError::InvalidReproduction(
                format!("input does not match test '{}': {}", self.test.id, e)
            )
        })?;

        let original_input = match reproduction.seed {
            Some(seed) => {
                let primary = self.primary()?;
                let generator = generators.get::<T>(primary)?;
                let mut rng = StdRng::seed_from_u64(seed);
                let original = generator.generate(&mut rng).map_err(|e| EngineError::GeneratorFault {
                    test_id: self.test.id.clone(),
                    generator: primary.to_string(),
                    message: e.to_string(),
                })?;
                Some(serde_json::to_value(&original)?)
            }
            None => None,
        };

        let evaluation = InvariantEvaluator::check(
            &self.test.invariant,
            input,
            0,
            reproduction.seed
        ).await;

        Ok(match evaluation {
            Evaluation::Skipped { precondition } =>
                ReplayReport {
                    test_id: self.test.id.clone(),
                    input: reproduction.input,
                    original_input,
                    reproduced: false,
                    skipped_by: Some(precondition),
                    checks: Vec::new(),
                    error: None,
                },
            Evaluation::Evaluated(result) =>
                ReplayReport {
                    test_id: self.test.id.clone(),
                    input: reproduction.input,
                    original_input,
                    reproduced: !result.success,
                    skipped_by: None,
                    error: if result.success { None } else { Some(result.failure_reason()) },
                    checks: result.checks,
                },
        })
    }
}

/// Caller-owned property engine: generator registry, registered tests and run options
#[derive(Default)]
pub struct PropertyEngine {
    generators: GeneratorRegistry,
    /// Registration order; re-registration replaces in place
    tests: Vec<Arc<dyn RegisteredTest>>,
    options: EngineOptions,
}

impl PropertyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    pub fn test_infos(&self) -> Vec<TestInfo> {
        self.tests
            .iter()
            .map(|test| test.info())
            .collect()
    }

    pub fn generator_infos(&self) -> Vec<GeneratorInfo> {
        self.generators.infos()
    }

    fn find(&self, test_id: &str) -> EngineResult<&Arc<dyn RegisteredTest>> {
        self.tests
            .iter()
            .find(|test| test.id() == test_id)
            .ok_or_else(|| EngineError::TestNotFound(test_id.to_string()))
    }

    fn prepare(&self, test: &Arc<dyn RegisteredTest>) -> EngineResult<PreparedRun> {
        let config = self.options.apply(test.config());
        debug!(
            "Preparing test '{}' ({} iterations, seed {:?})",
            test.id(),
            config.iterations,
            config.seed
        );
        test.prepare(&self.generators, config)
    }

    fn runs_parallel(&self, selected: &[Arc<dyn RegisteredTest>]) -> bool {
        self.options.parallel ||
            (!selected.is_empty() && selected.iter().all(|test| test.config().parallel))
    }

    /// Run `selected` in order; the first fault aborts with a partial summary
    async fn run_selected(
        &self,
        selected: Vec<Arc<dyn RegisteredTest>>,
        registered: usize
    ) -> EngineResult<Vec<PropertyTestResult>> {
        if self.runs_parallel(&selected) {
            return self.run_parallel(selected, registered).await;
        }

        let mut results = Vec::with_capacity(selected.len());
        for test in &selected {
            let outcome = match self.prepare(test) {
                Ok(run) => run.await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    return Err(Self::abort(test.id(), e, results, registered));
                }
            }
        }
        Ok(results)
    }

    async fn run_parallel(
        &self,
        selected: Vec<Arc<dyn RegisteredTest>>,
        registered: usize
    ) -> EngineResult<Vec<PropertyTestResult>> {
        let mut handles = Vec::with_capacity(selected.len());
        let mut prepare_fault = None;

        for test in &selected {
            match self.prepare(test) {
                Ok(run) => handles.push((test.id().to_string(), tokio::spawn(run))),
                Err(e) => {
                    prepare_fault = Some((test.id().to_string(), e));
                    break;
                }
            }
        }
        info!("Running {} test(s) on worker tasks", handles.len());

        let mut results = Vec::with_capacity(handles.len());
        let mut pending = handles.into_iter();
        while let Some((test_id, handle)) = pending.next() {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(EngineError::TaskFailed { test_id: test_id.clone(), message: e.to_string() }),
            };
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    for (_, remaining) in pending {
                        remaining.abort();
                    }
                    return Err(Self::abort(&test_id, e, results, registered));
                }
            }
        }

        match prepare_fault {
            Some((test_id, e)) => Err(Self::abort(&test_id, e, results, registered)),
            None => Ok(results),
        }
    }

    fn abort(
        test_id: &str,
        error: EngineError,
        results: Vec<PropertyTestResult>,
        registered: usize
    ) -> EngineError {
        error!("Aborting aggregate run at test '{}': {}", test_id, error);
        let completed = results.len();
        EngineError::AggregateAborted {
            test_id: test_id.to_string(),
            completed,
            source: Box::new(error),
            partial: Box::new(ResultAggregator::summarize(results, registered)),
        }
    }

    fn in_category(&self, category: &PropertyCategory) -> Vec<Arc<dyn RegisteredTest>> {
        self.tests
            .iter()
            .filter(|test| test.category() == category)
            .cloned()
            .collect()
    }

    /// Run one category and summarize it against the tests registered in it
    pub async fn summarize_category(
        &self,
        category: &PropertyCategory
    ) -> EngineResult<PropertyTestSummary> {
        let selected = self.in_category(category);
        let registered = selected.len();
        let results = self.run_selected(selected, registered).await?;
        Ok(ResultAggregator::summarize(results, registered))
    }

    /// Re-check the exact input captured in a reproduction string
    pub async fn replay(&self, reproduction: &str) -> EngineResult<ReplayReport> {
        let reproduction = Reproduction::decode(reproduction).map_err(|e|
            EngineError::InvalidReproduction(e.to_string())
        )?;
        let test = self.find(&reproduction.test_id)?;
        info!("Replaying counterexample for test '{}'", reproduction.test_id);
        test.replay(&self.generators, reproduction).await
    }
}

#[async_trait]
impl PropertyTestRunner for PropertyEngine {
    fn register_generator<T, G>(&mut self, generator: G)
        where T: 'static, G: PropertyGenerator<T> + 'static
    {
        self.generators.register::<T, G>(generator);
    }

    fn register_test<T: PropertyInput>(&mut self, test: PropertyTest<T>) -> EngineResult<()> {
        if test.generators.is_empty() {
            return Err(EngineError::InvalidTest {
                test_id: test.id,
                reason: "a property test needs at least one generator".to_string(),
            });
        }

        let registered: Arc<dyn RegisteredTest> = Arc::new(TypedTest { test: Arc::new(test) });
        match self.tests.iter().position(|existing| existing.id() == registered.id()) {
            Some(index) => {
                warn!("Test '{}' re-registered; previous registration replaced", registered.id());
                self.tests[index] = registered;
            }
            None => {
                debug!("Registered test '{}'", registered.id());
                self.tests.push(registered);
            }
        }
        Ok(())
    }

    async fn execute_test(&self, test_id: &str) -> EngineResult<PropertyTestResult> {
        let test = self.find(test_id)?;
        info!("Executing property test '{}'", test_id);
        self.prepare(test)?.await
    }

    async fn execute_category(
        &self,
        category: &PropertyCategory
    ) -> EngineResult<Vec<PropertyTestResult>> {
        let selected = self.in_category(category);
        info!("Executing {} test(s) in category {}", selected.len(), category);
        let registered = selected.len();
        self.run_selected(selected, registered).await
    }

    async fn execute_all(&self) -> EngineResult<PropertyTestSummary> {
        info!("Executing all {} registered test(s)", self.tests.len());
        let registered = self.tests.len();
        let results = self.run_selected(self.tests.clone(), registered).await?;
        let summary = ResultAggregator::summarize(results, registered);
        info!(
            "Property run complete: {} passed, {} failed ({:.1}% passing)",
            summary.passed,
            summary.failed,
            summary.coverage.passing_rate
        );
        Ok(summary)
    }
}
