/*!
 * Process Types
 * Immutable process specifications and per-run summaries
 */

use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};

/// Process lifecycle state within a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Not yet admitted to the ready queue
    Created,
    /// Eligible to run, sitting in the ready queue
    Ready,
    /// Occupying the CPU
    Running,
    /// Finished a generation, pending its comeback delay
    Waiting,
}

/// Immutable definition of one logical process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    #[serde(default)]
    pub comeback_delay: Tick,
    #[serde(default)]
    pub priority: Priority,
}

impl ProcessSpec {
    pub fn new(pid: Pid, arrival_time: Tick, burst_time: Tick) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            comeback_delay: 0,
            priority: 0,
        }
    }

    pub fn with_comeback(mut self, comeback_delay: Tick) -> Self {
        self.comeback_delay = comeback_delay;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Per-process outcome of a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSummary {
    pub pid: Pid,
    pub has_run: bool,
    pub waiting_time: Tick,
    /// Last interrupt minus arrival; `None` when never dispatched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround_time: Option<i64>,
    pub executed_ticks: Tick,
}
