use anyhow::Result;

use govprop::{
    EngineError,
    PropertyCategory,
    PropertyEngine,
    PropertyTestRunner,
    PropertyTestSummary,
};

use crate::cli::commands::report_error;
use crate::cli::ui;

/// Which tests a `run` invocation selects
pub enum Selection {
    All,
    Test(String),
    Category(PropertyCategory),
}

/// Run command: executes the selection and reports results.
/// Returns whether every selected test passed.
pub async fn execute(engine: &PropertyEngine, selection: Selection, json: bool) -> Result<bool> {
    if !json {
        ui::print_header("Property Tests");
        let options = engine.options();
        ui::print_info(
            &format!(
                "{} test(s) registered, {} generator(s), parallel: {}, seed: {}",
                engine.test_count(),
                engine.generators().len(),
                options.parallel,
                options.seed.map(|seed| seed.to_string()).unwrap_or_else(|| "per test".to_string())
            )
        );
    }

    let spinner = if json { None } else { Some(ui::spinner_with_message("Running property tests...")) };

    let outcome = match &selection {
        Selection::Test(test_id) => {
            let result = engine.execute_test(test_id).await;
            if let Some(spinner) = &spinner {
                spinner.finish_and_clear();
            }
            return match result {
                Ok(result) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        ui::print_test_result(&result);
                    }
                    Ok(result.passed)
                }
                Err(e) => {
                    report_error(&e, json)?;
                    Ok(false)
                }
            };
        }
        Selection::Category(category) => engine.summarize_category(category).await,
        Selection::All => engine.execute_all().await,
    };

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    match outcome {
        Ok(summary) => {
            report_summary(&summary, json)?;
            if !json {
                if summary.all_passed() {
                    ui::print_success("All properties hold");
                } else {
                    ui::print_warning(&format!("{} test(s) found counterexamples", summary.failed));
                }
            }
            Ok(summary.all_passed())
        }
        Err(e) => {
            if let EngineError::AggregateAborted { partial, completed, .. } = &e {
                if !json {
                    ui::print_warning(&format!("Run aborted after {} completed test(s)", completed));
                }
                report_summary(partial, json)?;
            }
            report_error(&e, json)?;
            Ok(false)
        }
    }
}

fn report_summary(summary: &PropertyTestSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        ui::print_summary(summary);
    }
    Ok(())
}
