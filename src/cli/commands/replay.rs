use anyhow::Result;

use govprop::PropertyEngine;

use crate::cli::commands::report_error;
use crate::cli::ui;

/// Replay command: re-checks the input captured in a reproduction string.
/// Returns whether the invariant now holds for it.
pub async fn execute(engine: &PropertyEngine, reproduction: &str, json: bool) -> Result<bool> {
    if !json {
        ui::print_header("Replay Counterexample");
    }

    match engine.replay(reproduction).await {
        Ok(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                ui::print_replay(&report);
            }
            Ok(!report.reproduced)
        }
        Err(e) => {
            report_error(&e, json)?;
            Ok(false)
        }
    }
}
