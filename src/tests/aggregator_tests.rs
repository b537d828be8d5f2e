#[cfg(test)]
mod tests {
    use crate::implementations::aggregator::{ percentage, ResultAggregator };
    use crate::models::common::PropertyCategory;
    use crate::tests::{ result, setup };

    #[tokio::test]
    async fn test_six_of_ten_is_sixty_percent() {
        setup();
        let results = (0..10)
            .map(|i| result(&format!("rule_{}", i), PropertyCategory::BusinessRules, i < 6, 10))
            .collect();

        let summary = ResultAggregator::summarize(results, 10);

        assert_eq!(summary.passed, 6);
        assert_eq!(summary.failed, 4);
        assert_eq!(summary.coverage.passing_rate, 60.0);
        assert_eq!(summary.total_iterations, 100);
    }

    #[tokio::test]
    async fn test_passing_rate_over_executed_tests() {
        setup();
        let results = vec![
            result("quorum", PropertyCategory::GovernanceInvariants, true, 100),
            result("term_limits", PropertyCategory::GovernanceInvariants, true, 100),
            result("budget", PropertyCategory::BusinessRules, true, 100),
            result("access", PropertyCategory::SecurityConstraints, false, 12),
            result("minutes", PropertyCategory::DataIntegrity, false, 40)
        ];

        let summary = ResultAggregator::summarize(results, 5);

        assert_eq!(summary.total_tests, 5);
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.coverage.passing_rate, 60.0);
        assert_eq!(summary.coverage.test_coverage, 100.0);
        assert_eq!(summary.coverage.invariant_coverage, 100.0);
        assert_eq!(summary.total_iterations, 352);
        assert_eq!(summary.coverage.category_distribution[&PropertyCategory::GovernanceInvariants], 2);
        let governance = &summary.categories[&PropertyCategory::GovernanceInvariants];
        assert_eq!(governance.test_ids, vec!["quorum".to_string(), "term_limits".to_string()]);
    }

    #[tokio::test]
    async fn test_coverage_against_registered_surface() {
        setup();
        let results = vec![
            result("quorum", PropertyCategory::GovernanceInvariants, true, 100),
            // Every input skipped by a precondition
            result("filtered", PropertyCategory::ComplianceRules, true, 0)
        ];

        let summary = ResultAggregator::summarize(results, 8);

        assert_eq!(summary.coverage.test_coverage, 25.0);
        assert_eq!(summary.coverage.invariant_coverage, 12.5);
        assert_eq!(summary.coverage.passing_rate, 100.0);
        assert!(summary.all_passed());
    }

    #[tokio::test]
    async fn test_empty_run_has_zero_rates() {
        setup();
        let summary = ResultAggregator::summarize(Vec::new(), 0);

        assert_eq!(summary.total_tests, 0);
        assert_eq!(summary.coverage.passing_rate, 0.0);
        assert_eq!(summary.coverage.test_coverage, 0.0);
        assert!(summary.categories.is_empty());
        assert!(summary.all_passed());
    }

    #[tokio::test]
    async fn test_percentage_is_exact_for_whole_ratios() {
        setup();
        assert_eq!(percentage(3, 5), 60.0);
        assert_eq!(percentage(7, 0), 0.0);
    }

    #[tokio::test]
    async fn test_summary_serializes_categories_as_names() {
        setup();
        let summary = ResultAggregator::summarize(
            vec![result("treasury", PropertyCategory::Custom("treasury_controls".to_string()), true, 1)],
            1
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["categories"]["treasury_controls"]["passed"], serde_json::json!(1));
        assert_eq!(json["coverage"]["category_distribution"]["treasury_controls"], serde_json::json!(1));
    }
}
