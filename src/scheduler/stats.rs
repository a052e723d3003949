/*!
 * Simulation Statistics
 * Run counters, averages and the final report
 */

use super::timeline::Timeline;
use super::types::Algorithm;
use crate::core::types::{Pid, Tick};
use crate::process::{ProcessRecord, ProcessSummary};
use serde::{Deserialize, Serialize};

/// Scheduling event counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunCounters {
    pub dispatches: u32,
    pub preemptions: u32,
    pub completions: u32,
    pub comebacks: u32,
    pub priority_decrements: u32,
}

/// Outcome of a single simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationReport {
    pub algorithm: Algorithm,
    pub horizon: Tick,
    pub timeline: Timeline,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub processes: Vec<ProcessSummary>,
    pub counters: RunCounters,
}

impl SimulationReport {
    pub(crate) fn new(
        algorithm: Algorithm,
        horizon: Tick,
        timeline: Timeline,
        processes: &[ProcessRecord],
        counters: RunCounters,
    ) -> Self {
        Self {
            algorithm,
            horizon,
            timeline,
            average_waiting_time: average_waiting_time(processes),
            average_turnaround_time: average_turnaround_time(processes),
            processes: processes.iter().map(ProcessRecord::summary).collect(),
            counters,
        }
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessSummary> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Number of processes dispatched at least once
    pub fn executed_count(&self) -> usize {
        self.processes.iter().filter(|p| p.has_run).count()
    }

    /// Fraction of the horizon the CPU was occupied
    pub fn cpu_utilization(&self) -> f64 {
        if self.horizon == 0 {
            return 0.0;
        }
        f64::from(self.timeline.busy_ticks()) / f64::from(self.horizon)
    }
}

/// Mean ready queue time over dispatched processes
pub fn average_waiting_time(processes: &[ProcessRecord]) -> f64 {
    let executed = processes.iter().filter(|p| p.has_run());
    mean(executed.map(|p| i64::from(p.waiting_time())))
}

/// Mean of last interrupt minus arrival over dispatched processes
pub fn average_turnaround_time(processes: &[ProcessRecord]) -> f64 {
    mean(processes.iter().filter_map(ProcessRecord::turnaround_time))
}

fn mean(values: impl Iterator<Item = i64>) -> f64 {
    let (sum, count) = values.fold((0i64, 0u32), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}
