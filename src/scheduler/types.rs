/*!
 * Scheduler Types
 * Algorithm variants expressed as data: ordering, preemption and aging
 */

use crate::core::errors::SimulationError;
use crate::core::types::{SimResult, Tick};
use crate::process::ProcessRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default round robin time slice, in ticks
pub const DEFAULT_TIME_QUANTUM: Tick = 5;

/// Default aging period for the priority variants, in ticks
pub const DEFAULT_AGING_QUANTUM: Tick = 5;

/// Algorithm selector without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    FirstComeFirstServed,
    ShortestJobFirst,
    ShortestRemainingTimeFirst,
    RoundRobin,
    PreemptivePriority,
    NonPreemptivePriority,
}

impl AlgorithmKind {
    /// All variants, in menu order
    pub const ALL: [AlgorithmKind; 6] = [
        AlgorithmKind::FirstComeFirstServed,
        AlgorithmKind::ShortestJobFirst,
        AlgorithmKind::ShortestRemainingTimeFirst,
        AlgorithmKind::RoundRobin,
        AlgorithmKind::PreemptivePriority,
        AlgorithmKind::NonPreemptivePriority,
    ];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstComeFirstServed => "fcfs",
            Self::ShortestJobFirst => "sjf",
            Self::ShortestRemainingTimeFirst => "srtf",
            Self::RoundRobin => "round_robin",
            Self::PreemptivePriority => "priority",
            Self::NonPreemptivePriority => "np_priority",
        }
    }

    /// Human readable name, as shown in the menu
    pub const fn title(&self) -> &'static str {
        match self {
            Self::FirstComeFirstServed => "First Come First Serve",
            Self::ShortestJobFirst => "Shortest Job First",
            Self::ShortestRemainingTimeFirst => "Shortest Remaining Time First",
            Self::RoundRobin => "Round Robin",
            Self::PreemptivePriority => "Preemptive priority scheduling with aging",
            Self::NonPreemptivePriority => "Non-preemptive priority scheduling with aging",
        }
    }

    /// Look up by 1-based menu position
    pub fn from_menu_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fcfs" | "first_come_first_served" | "fifo" => Ok(Self::FirstComeFirstServed),
            "sjf" | "shortest_job_first" => Ok(Self::ShortestJobFirst),
            "srtf" | "shortest_remaining_time_first" => Ok(Self::ShortestRemainingTimeFirst),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "priority" | "prio" | "preemptive_priority" => Ok(Self::PreemptivePriority),
            "np_priority" | "np_prio" | "non_preemptive_priority" => {
                Ok(Self::NonPreemptivePriority)
            }
            _ => Err(SimulationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ready queue ordering key; ties fall back to ready queue entry time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrder {
    /// Insertion order
    Fifo,
    BurstTime,
    RemainingTime,
    Priority,
}

impl QueueOrder {
    /// Ordering key for a keyed queue (`None` for FIFO)
    #[inline]
    pub fn key(&self, process: &ProcessRecord) -> Option<u64> {
        match self {
            Self::Fifo => None,
            Self::BurstTime => Some(u64::from(process.burst_time())),
            Self::RemainingTime => Some(u64::from(process.remaining_time())),
            Self::Priority => Some(u64::from(process.priority())),
        }
    }
}

/// Condition under which the running process gives up the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preemption {
    /// Head has strictly less remaining time
    ShorterRemaining,
    /// Time slice measured from the last dispatch has elapsed
    QuantumExpired(Tick),
    /// Head has a strictly lower priority value
    HigherPriority,
}

impl Preemption {
    /// Evaluate the trigger against the current ready queue head
    pub fn triggers(&self, tick: Tick, running: &ProcessRecord, head: &ProcessRecord) -> bool {
        match *self {
            Self::ShorterRemaining => head.remaining_time() < running.remaining_time(),
            Self::QuantumExpired(quantum) => {
                (tick - running.deployment_time()) % quantum == 0
            }
            Self::HigherPriority => head.priority() < running.priority(),
        }
    }
}

/// A fully configured scheduling algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Algorithm {
    FirstComeFirstServed,
    ShortestJobFirst,
    ShortestRemainingTimeFirst,
    RoundRobin { quantum: Tick },
    PreemptivePriority { aging_quantum: Tick },
    NonPreemptivePriority { aging_quantum: Tick },
}

impl Algorithm {
    /// Build a variant, filling in whichever quantum it needs
    pub fn from_kind(kind: AlgorithmKind, time_quantum: Tick, aging_quantum: Tick) -> Self {
        match kind {
            AlgorithmKind::FirstComeFirstServed => Self::FirstComeFirstServed,
            AlgorithmKind::ShortestJobFirst => Self::ShortestJobFirst,
            AlgorithmKind::ShortestRemainingTimeFirst => Self::ShortestRemainingTimeFirst,
            AlgorithmKind::RoundRobin => Self::RoundRobin {
                quantum: time_quantum,
            },
            AlgorithmKind::PreemptivePriority => Self::PreemptivePriority { aging_quantum },
            AlgorithmKind::NonPreemptivePriority => Self::NonPreemptivePriority { aging_quantum },
        }
    }

    pub const fn kind(&self) -> AlgorithmKind {
        match self {
            Self::FirstComeFirstServed => AlgorithmKind::FirstComeFirstServed,
            Self::ShortestJobFirst => AlgorithmKind::ShortestJobFirst,
            Self::ShortestRemainingTimeFirst => AlgorithmKind::ShortestRemainingTimeFirst,
            Self::RoundRobin { .. } => AlgorithmKind::RoundRobin,
            Self::PreemptivePriority { .. } => AlgorithmKind::PreemptivePriority,
            Self::NonPreemptivePriority { .. } => AlgorithmKind::NonPreemptivePriority,
        }
    }

    pub const fn ordering(&self) -> QueueOrder {
        match self {
            Self::FirstComeFirstServed | Self::RoundRobin { .. } => QueueOrder::Fifo,
            Self::ShortestJobFirst => QueueOrder::BurstTime,
            Self::ShortestRemainingTimeFirst => QueueOrder::RemainingTime,
            Self::PreemptivePriority { .. } | Self::NonPreemptivePriority { .. } => {
                QueueOrder::Priority
            }
        }
    }

    /// Preemption rule, `None` for non-preemptive variants
    pub const fn preemption(&self) -> Option<Preemption> {
        match *self {
            Self::ShortestRemainingTimeFirst => Some(Preemption::ShorterRemaining),
            Self::RoundRobin { quantum } => Some(Preemption::QuantumExpired(quantum)),
            Self::PreemptivePriority { .. } => Some(Preemption::HigherPriority),
            _ => None,
        }
    }

    /// Aging period, `None` for variants without aging
    pub const fn aging_quantum(&self) -> Option<Tick> {
        match *self {
            Self::PreemptivePriority { aging_quantum }
            | Self::NonPreemptivePriority { aging_quantum } => Some(aging_quantum),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_preemptive(&self) -> bool {
        self.preemption().is_some()
    }

    /// Reject zero quanta, which would make the periodic rules undefined
    pub fn validate(&self) -> SimResult<()> {
        let quantum = match *self {
            Self::RoundRobin { quantum } => quantum,
            Self::PreemptivePriority { aging_quantum }
            | Self::NonPreemptivePriority { aging_quantum } => aging_quantum,
            _ => return Ok(()),
        };
        if quantum == 0 {
            return Err(SimulationError::InvalidQuantum {
                algorithm: self.kind().as_str().to_string(),
                quantum,
            });
        }
        Ok(())
    }
}

impl From<AlgorithmKind> for Algorithm {
    fn from(kind: AlgorithmKind) -> Self {
        Self::from_kind(kind, DEFAULT_TIME_QUANTUM, DEFAULT_AGING_QUANTUM)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().title())
    }
}
