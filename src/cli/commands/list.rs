use anyhow::{ anyhow, Result };
use colored::*;

use govprop::PropertyEngine;

use crate::cli::ui;

/// List command: shows registered tests and/or generators
pub fn execute(engine: &PropertyEngine, what: &str, json: bool) -> Result<()> {
    let (show_tests, show_generators) = match what.to_lowercase().as_str() {
        "tests" => (true, false),
        "generators" => (false, true),
        "all" => (true, true),
        other => {
            return Err(anyhow!("Unknown list target '{}' (expected tests, generators or all)", other));
        }
    };

    if json {
        let tests = show_tests.then(|| engine.test_infos());
        let generators = show_generators.then(|| engine.generator_infos());
        let body = serde_json::json!({ "tests": tests, "generators": generators });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if show_tests {
        ui::print_header("Registered Tests");
        for test in engine.test_infos() {
            println!(
                "{} [{}] ({}) generators: {}",
                test.id.bold(),
                test.category,
                test.severity,
                test.generators.join(", ")
            );
            if !test.description.is_empty() {
                ui::print_text(&format!("    {}", test.description));
            }
        }
    }

    if show_generators {
        ui::print_header("Registered Generators");
        for generator in engine.generator_infos() {
            let constraints = generator.constraints
                .as_ref()
                .map(|constraints| constraints.describe())
                .unwrap_or_default();
            println!("{} <{}> {} {}", generator.id.bold(), generator.type_tag, generator.name, constraints.dimmed());
        }
    }
    Ok(())
}
