/*!
 * CPU Scheduling Simulator Library
 * Discrete-time simulation of classical CPU scheduling algorithms
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod render;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::SimulationError;
pub use crate::core::types::{Pid, Priority, SimResult, Tick};
pub use config::{demo_processes, SimConfig};
pub use monitoring::init_tracing;
pub use process::{ProcessRecord, ProcessSpec, ProcessState, ProcessSummary};
pub use render::{ChartStyle, GanttChart, ReportView};
pub use scheduler::{
    run, Algorithm, AlgorithmKind, GanttEntry, SimulationReport, Simulator, TickView, Timeline,
};
