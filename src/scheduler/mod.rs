/*!
 * Scheduler Module
 * CPU scheduling simulation: algorithm variants, ready queue and engine
 */

mod engine;
mod queue;
pub mod stats;
pub mod timeline;
pub mod types;

use crate::core::types::{SimResult, Tick};
use crate::process::ProcessSpec;

// Re-export public API
pub use engine::{validate_specs, Simulator, TickView};
pub use stats::{average_turnaround_time, average_waiting_time, RunCounters, SimulationReport};
pub use timeline::{GanttEntry, Timeline};
pub use types::{
    Algorithm, AlgorithmKind, Preemption, QueueOrder, DEFAULT_AGING_QUANTUM, DEFAULT_TIME_QUANTUM,
};

/// Run `algorithm` over `specs` for `horizon` ticks
pub fn run(
    specs: &[ProcessSpec],
    horizon: Tick,
    algorithm: Algorithm,
) -> SimResult<SimulationReport> {
    Simulator::new(algorithm, horizon)?.run(specs)
}
