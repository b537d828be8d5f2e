use serde::{ Deserialize, Serialize };
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::{ EngineOptions, ExecutionConfig };

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidEnvValue { var: String, value: String },
}

pub const SEED_VAR: &str = "GOVPROP_SEED";
pub const ITERATIONS_VAR: &str = "GOVPROP_ITERATIONS";
pub const PARALLEL_VAR: &str = "GOVPROP_PARALLEL";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Execution settings applied to tests that do not override them
    pub defaults: ExecutionConfig,

    /// Engine-wide overrides (parallel mode, forced seed, forced iterations)
    pub engine: EngineOptions,

    /// Log level used when none is given on the command line
    pub log_level: Option<String>,

    /// Per-test execution overrides, keyed by test id
    pub tests: HashMap<String, ExecutionConfig>,
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    /// Apply `GOVPROP_*` environment overrides on top of the loaded values
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        use log::debug;

        if let Some(seed) = read_env::<u64>(SEED_VAR)? {
            debug!("Using seed {} from {}", seed, SEED_VAR);
            self.engine.seed = Some(seed);
        }
        if let Some(iterations) = read_env::<u32>(ITERATIONS_VAR)? {
            debug!("Using {} iterations from {}", iterations, ITERATIONS_VAR);
            self.engine.iterations = Some(iterations);
        }
        if let Some(parallel) = read_env::<bool>(PARALLEL_VAR)? {
            debug!("Parallel mode {} from {}", parallel, PARALLEL_VAR);
            self.engine.parallel = parallel;
        }
        Ok(())
    }

    /// Execution settings for a test: its own override, else the defaults
    pub fn execution_for(&self, test_id: &str) -> ExecutionConfig {
        self.tests.get(test_id).cloned().unwrap_or_else(|| self.defaults.clone())
    }
}

fn read_env<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>().ok();
            match parsed {
                Some(parsed) => Ok(Some(parsed)),
                None => Err(ConfigError::InvalidEnvValue { var: var.to_string(), value }),
            }
        }
        Err(_) => Ok(None),
    }
}
