use colored::*;
use console::Term;
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use govprop::{
    InvariantCheckResult,
    PropertyCounterExample,
    PropertyTestResult,
    PropertyTestSummary,
    ReplayReport,
    Severity,
};

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text wrapped to the terminal width
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(10).max(20)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("[{}]", severity);
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.normal(),
    }
}

fn print_check(check: &InvariantCheckResult) {
    let mut line = format!("{} {}", check.name.bold(), check.message);
    if let Some(actual) = &check.actual {
        line.push_str(&format!(" (actual {}", actual));
        if let Some(constraint) = &check.constraint {
            line.push_str(&format!(", expected {}", constraint));
        }
        line.push(')');
    }
    println!("    {} {}", severity_label(check.severity), line);
}

pub fn print_counterexample(counterexample: &PropertyCounterExample) {
    print_result("  Counterexample", &counterexample.input.to_string());
    if counterexample.shrunk {
        print_result(
            "  Shrunk from",
            &format!("{} ({} step(s))", counterexample.original_input, counterexample.shrink_steps)
        );
    }
    print_result("  Error", &counterexample.error);
    for check in &counterexample.failed_checks {
        print_check(check);
    }
    print_result("  Reproduce with", "");
    print_text(&format!("    govprop replay '{}'", counterexample.reproduction));
}

/// Print one test's outcome
pub fn print_test_result(result: &PropertyTestResult) {
    let status = if result.passed {
        if result.timed_out { "⏱ passed (timed out)".yellow().bold() } else { "✓ passed".green().bold() }
    } else {
        "✗ failed".red().bold()
    };
    println!(
        "{} {} [{}] {} iteration(s), {} check(s), {} skipped, {:.2?}",
        status,
        result.test_id.bold(),
        result.category,
        result.iterations,
        result.coverage.invariant_checks,
        result.coverage.skipped_inputs,
        result.execution_time
    );
    for counterexample in &result.counterexamples {
        print_counterexample(counterexample);
    }
}

/// Print an aggregate summary
pub fn print_summary(summary: &PropertyTestSummary) {
    for result in &summary.results {
        print_test_result(result);
    }

    print_header("Summary");
    print_result(
        "Tests",
        &format!(
            "{} run of {} registered, {} passed, {} failed",
            summary.total_tests,
            summary.registered_tests,
            summary.passed,
            summary.failed
        )
    );
    print_result("Iterations", &summary.total_iterations.to_string());
    print_result("Time", &format!("{:.2?}", summary.total_execution_time));
    print_result("Test coverage", &format!("{:.1}%", summary.coverage.test_coverage));
    print_result("Passing rate", &format!("{:.1}%", summary.coverage.passing_rate));
    print_result("Invariant coverage", &format!("{:.1}%", summary.coverage.invariant_coverage));
    for (category, counts) in &summary.categories {
        println!("  {}: {}/{} passed", category, counts.passed, counts.total);
    }
}

pub fn print_replay(report: &ReplayReport) {
    print_result("Test", &report.test_id);
    print_result("Input", &report.input.to_string());
    if let Some(original) = &report.original_input {
        print_result("Original draw", &original.to_string());
    }
    if let Some(precondition) = &report.skipped_by {
        print_warning(&format!("Input skipped by precondition '{}'", precondition));
        return;
    }
    for check in &report.checks {
        print_check(check);
    }
    if report.reproduced {
        print_error(report.error.as_deref().unwrap_or("invariant violated"));
    } else {
        print_success("Invariant holds for this input");
    }
}
