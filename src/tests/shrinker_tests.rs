#[cfg(test)]
mod tests {
    use std::time::{ Duration, Instant };
    use async_trait::async_trait;

    use crate::config::ExecutionConfig;
    use crate::errors::CheckError;
    use crate::implementations::evaluator::{ Evaluation, InvariantEvaluator };
    use crate::implementations::generators::IntRangeGenerator;
    use crate::implementations::shrinker::Shrinker;
    use crate::models::common::{ PropertyCategory, Severity };
    use crate::models::invariant::{ CheckOutcome, InvariantCheckResult, PropertyInvariant };
    use crate::models::property::{ PropertyTest, ShrinkPolicy, ShrinkingStrategy };
    use crate::models::result::PropertyResult;
    use crate::tests::{ below, setup };
    use crate::traits::InvariantCheck;

    async fn failing(test: &PropertyTest<i64>, input: i64) -> PropertyResult<i64> {
        match InvariantEvaluator::check(&test.invariant, input, 3, Some(1234)).await {
            Evaluation::Evaluated(result) if !result.success => result,
            _ => panic!("{} should fail '{}'", input, test.id),
        }
    }

    fn never_holds() -> PropertyInvariant<i64> {
        PropertyInvariant::new("never holds", Severity::Low, |_: &i64| {
            Ok(CheckOutcome::from_checks(vec![InvariantCheckResult::fail("never", "always fails", Severity::Low)]))
        })
    }

    #[tokio::test]
    async fn test_binary_shrink_reaches_origin() {
        setup();
        let generator = IntRangeGenerator::new("percent", 0, 100).with_origin(50);
        let test = PropertyTest::new("below_50", "Below", PropertyCategory::BusinessRules, "percent", below(50));
        let mut start = failing(&test, 97).await;
        start.metadata.memory_kb = Some(2_048);

        let outcome = Shrinker::shrink(&test, &generator, start, &ShrinkingStrategy::default(), &ExecutionConfig::default()).await;

        assert_eq!(outcome.minimized.input, 50);
        assert_eq!(outcome.minimized.metadata.memory_kb, Some(2_048));
        assert_eq!(outcome.steps_taken, 1);
        assert_eq!(outcome.minimized.metadata.iteration, 3);
        assert_eq!(outcome.minimized.metadata.seed, Some(1234));
    }

    #[tokio::test]
    async fn test_linear_shrink_finds_threshold() {
        setup();
        let generator = IntRangeGenerator::new("count", 0, 100);
        let test = PropertyTest::new("below_40", "Below", PropertyCategory::BusinessRules, "count", below(40));
        let start = failing(&test, 45).await;

        let strategy = ShrinkingStrategy::new(ShrinkPolicy::Linear, 100);
        let outcome = Shrinker::shrink(&test, &generator, start, &strategy, &ExecutionConfig::default()).await;

        // 45 -> 44 -> ... -> 40; 39 passes
        assert_eq!(outcome.minimized.input, 40);
        assert_eq!(outcome.steps_taken, 5);
    }

    #[tokio::test]
    async fn test_step_bound_is_smaller_of_strategy_and_config() {
        setup();
        let generator = IntRangeGenerator::new("count", 0, 10_000);
        let test = PropertyTest::new("never", "Never", PropertyCategory::BusinessRules, "count", never_holds());
        let step_down = || ShrinkingStrategy::custom(10, |value: &i64| vec![value - 1]);

        let start = failing(&test, 1_000).await;
        let outcome = Shrinker::shrink(&test, &generator, start, &step_down(), &ExecutionConfig::default()).await;
        assert_eq!(outcome.steps_taken, 10);
        assert_eq!(outcome.minimized.input, 990);

        let start = failing(&test, 1_000).await;
        let config = ExecutionConfig::default().with_max_shrink_steps(3);
        let outcome = Shrinker::shrink(&test, &generator, start, &step_down(), &config).await;
        assert_eq!(outcome.steps_taken, 3);
        assert_eq!(outcome.minimized.input, 997);
    }

    #[tokio::test]
    async fn test_candidates_equal_to_current_are_skipped() {
        setup();
        let generator = IntRangeGenerator::new("count", 0, 100);
        let test = PropertyTest::new("never", "Never", PropertyCategory::BusinessRules, "count", never_holds());
        let start = failing(&test, 8).await;

        let echo = ShrinkingStrategy::custom(50, |value: &i64| vec![*value, *value]);
        let outcome = Shrinker::shrink(&test, &generator, start, &echo, &ExecutionConfig::default()).await;

        assert_eq!(outcome.steps_taken, 0);
        assert_eq!(outcome.minimized.input, 8);
    }

    #[tokio::test]
    async fn test_skipped_candidates_are_not_accepted() {
        setup();
        let generator = IntRangeGenerator::new("count", 0, 100);
        let invariant = never_holds().with_precondition("at_least_20", |value: &i64| *value >= 20);
        let test = PropertyTest::new("never", "Never", PropertyCategory::BusinessRules, "count", invariant);
        let start = failing(&test, 30).await;

        let outcome = Shrinker::shrink(&test, &generator, start, &ShrinkingStrategy::default(), &ExecutionConfig::default()).await;

        // 0 is skipped, 15 is skipped, 23 fails; descent continues toward 20
        assert_eq!(outcome.minimized.input, 20);
        assert!(!outcome.minimized.success);
    }

    struct SlowRejection;

    #[async_trait]
    impl InvariantCheck<i64> for SlowRejection {
        async fn check(&self, _: &i64) -> Result<CheckOutcome, CheckError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(CheckOutcome::from_checks(vec![InvariantCheckResult::fail("rejected", "always rejected", Severity::Low)]))
        }
    }

    #[tokio::test]
    async fn test_shrink_timeout_stops_descent() {
        setup();
        let generator = IntRangeGenerator::new("count", 0, 10_000);
        let invariant = PropertyInvariant::from_check("always rejected", Severity::Low, SlowRejection);
        let test = PropertyTest::new("slow", "Slow", PropertyCategory::BusinessRules, "count", invariant);
        let start = failing(&test, 5_000).await;

        let step_down = ShrinkingStrategy::custom(1_000, |value: &i64| vec![value - 1]);
        let config = ExecutionConfig { shrink_timeout_ms: Some(50), ..ExecutionConfig::default() };
        let started = Instant::now();
        let outcome = Shrinker::shrink(&test, &generator, start, &step_down, &config).await;

        assert!(outcome.steps_taken > 0);
        assert!(outcome.steps_taken < 100);
        assert_eq!(outcome.minimized.input, 5_000 - (outcome.steps_taken as i64));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
