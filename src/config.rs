/*!
 * Simulation Configuration
 * Horizon, quanta and process set, loadable from JSON
 */

use crate::core::types::{SimResult, Tick};
use crate::process::ProcessSpec;
use crate::scheduler::{
    Algorithm, AlgorithmKind, DEFAULT_AGING_QUANTUM, DEFAULT_TIME_QUANTUM,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "SCHED_SIM_CONFIG";

/// Default number of simulated ticks
pub const DEFAULT_HORIZON: Tick = 200;

/// Everything a caller needs to drive the simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimConfig {
    pub horizon: Tick,
    pub time_quantum: Tick,
    pub aging_quantum: Tick,
    pub processes: Vec<ProcessSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            time_quantum: DEFAULT_TIME_QUANTUM,
            aging_quantum: DEFAULT_AGING_QUANTUM,
            processes: demo_processes(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            processes = config.processes.len(),
            horizon = config.horizon,
            "Loaded simulation config"
        );
        Ok(config)
    }

    /// Load from `SCHED_SIM_CONFIG` if set, otherwise the built-in demo
    pub fn load() -> SimResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_path(path),
            _ => Ok(Self::default()),
        }
    }

    /// Configure `kind` with this config's quanta
    pub fn algorithm(&self, kind: AlgorithmKind) -> Algorithm {
        Algorithm::from_kind(kind, self.time_quantum, self.aging_quantum)
    }
}

/// Seven-process demo set: `(id, arrival, burst, comeback, priority)`
pub fn demo_processes() -> Vec<ProcessSpec> {
    [
        (1, 0, 10, 2, 3),
        (2, 1, 8, 4, 2),
        (3, 3, 14, 6, 3),
        (4, 4, 7, 8, 1),
        (5, 6, 5, 3, 0),
        (6, 7, 4, 6, 1),
        (7, 8, 6, 9, 2),
    ]
    .into_iter()
    .map(|(pid, arrival, burst, comeback, priority)| {
        ProcessSpec::new(pid, arrival, burst)
            .with_comeback(comeback)
            .with_priority(priority)
    })
    .collect()
}
