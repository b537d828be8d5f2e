pub mod list;
pub mod replay;
pub mod run;

use anyhow::Result;

use govprop::{ EngineError, RecoverableError };

use crate::cli::ui;

/// JSON body printed for an engine error under `--output-format json`
pub fn error_body(error: &EngineError) -> serde_json::Value {
    serde_json::json!({
        "error": error.to_string(),
        "recoverable": error.is_recoverable(),
        "suggestion": error.recovery_strategy(),
    })
}

/// Report an engine error as JSON on stdout, or as coloured text with a recovery hint
pub fn report_error(error: &EngineError, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&error_body(error))?);
        return Ok(());
    }
    ui::print_error(&error.to_string());
    if let Some(suggestion) = error.recovery_strategy() {
        ui::print_info(&suggestion);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::error_body;
    use govprop::EngineError;

    #[test]
    fn test_error_body_for_bad_reproduction() {
        let body = error_body(&EngineError::InvalidReproduction("missing test_id".to_string()));

        assert_eq!(body["error"], "Invalid reproduction string: missing test_id");
        assert_eq!(body["recoverable"], true);
        assert_eq!(body["suggestion"], "Paste the reproduction string exactly as reported");
    }

    #[test]
    fn test_error_body_without_suggestion() {
        let body = error_body(&EngineError::TaskFailed { test_id: "quorum".to_string(), message: "join".to_string() });

        assert_eq!(body["recoverable"], false);
        assert!(body["suggestion"].is_null());
    }
}
