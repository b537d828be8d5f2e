use std::time::Duration;
use serde::{ Deserialize, Serialize };

/// Per-test execution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Upper bound on generated inputs per run
    pub iterations: u32,
    /// Wall-clock budget, polled between iterations
    pub timeout_ms: u64,
    pub shrinking_enabled: bool,
    pub max_shrink_steps: usize,
    /// Allow this test to run on its own worker task during aggregate runs
    pub parallel: bool,
    /// Base seed; iteration `i` draws from `seed + i`
    pub seed: Option<u64>,
    /// Optional wall-clock budget for shrinking; unbounded when absent
    pub shrink_timeout_ms: Option<u64>,
}

impl ExecutionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn shrink_timeout(&self) -> Option<Duration> {
        self.shrink_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_shrinking(mut self, enabled: bool) -> Self {
        self.shrinking_enabled = enabled;
        self
    }

    pub fn with_max_shrink_steps(mut self, steps: usize) -> Self {
        self.max_shrink_steps = steps;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            timeout_ms: 30_000,
            shrinking_enabled: true,
            max_shrink_steps: 1_000,
            parallel: false,
            seed: None,
            shrink_timeout_ms: None,
        }
    }
}

/// Options applied by the engine to every run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Spawn independent tests onto separate tasks in aggregate runs
    pub parallel: bool,
    /// Overrides every test's seed when set
    pub seed: Option<u64>,
    /// Overrides every test's iteration bound when set
    pub iterations: Option<u32>,
}

impl EngineOptions {
    /// Apply the engine-wide overrides to a test's own configuration
    pub fn apply(&self, config: &ExecutionConfig) -> ExecutionConfig {
        let mut effective = config.clone();
        if let Some(seed) = self.seed {
            effective.seed = Some(seed);
        }
        if let Some(iterations) = self.iterations {
            effective.iterations = iterations;
        }
        effective
    }
}
