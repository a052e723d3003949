/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation errors with serialization support
///
/// Every variant is raised before the tick loop starts; once a run is
/// accepted it always completes.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("Process set is empty")]
    #[diagnostic(
        code(simulation::empty_process_set),
        help("Provide at least one process specification.")
    )]
    EmptyProcessSet,

    #[error("Invalid horizon: {0}")]
    #[diagnostic(
        code(simulation::invalid_horizon),
        help("The simulation horizon must be at least 1 tick.")
    )]
    InvalidHorizon(Tick),

    #[error("Duplicate process id: {0}")]
    #[diagnostic(
        code(simulation::duplicate_pid),
        help("Every process in the set needs a unique id.")
    )]
    DuplicatePid(Pid),

    #[error("Process {pid} has a burst time of zero")]
    #[diagnostic(
        code(simulation::invalid_burst),
        help("A process must need at least one tick of CPU time.")
    )]
    InvalidBurst { pid: Pid },

    #[error("Invalid quantum {quantum} for {algorithm}")]
    #[diagnostic(
        code(simulation::invalid_quantum),
        help("Round robin and aging quanta must be at least 1 tick.")
    )]
    InvalidQuantum { algorithm: String, quantum: Tick },

    #[error("Unknown algorithm: {0}")]
    #[diagnostic(
        code(simulation::unknown_algorithm),
        help("Valid: fcfs, sjf, srtf, rr, priority, np-priority")
    )]
    UnknownAlgorithm(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(simulation::config),
        help("Check that the configuration file exists and is valid JSON.")
    )]
    Config(String),
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Config(err.to_string())
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Config(err.to_string())
    }
}
