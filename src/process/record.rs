/*!
 * Process Record
 * Mutable per-run process control block
 */

use super::types::{ProcessSpec, ProcessState, ProcessSummary};
use crate::core::types::{Pid, Priority, Tick};

/// Per-run state of one process
///
/// Built fresh from a [`ProcessSpec`] at the start of every run, so runs
/// never observe each other's mutations. Only the engine mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    spec: ProcessSpec,
    state: ProcessState,
    remaining_time: Tick,
    priority: Priority,
    ready_queue_time: Tick,
    deployment_time: Tick,
    waiting_time: Tick,
    finish_time: Tick,
    interrupt_time: Tick,
    executed_ticks: Tick,
    has_run: bool,
}

impl ProcessRecord {
    pub fn new(spec: ProcessSpec) -> Self {
        Self {
            spec,
            state: ProcessState::Created,
            remaining_time: spec.burst_time,
            priority: spec.priority,
            ready_queue_time: 0,
            deployment_time: 0,
            waiting_time: 0,
            finish_time: 0,
            interrupt_time: 0,
            executed_ticks: 0,
            has_run: false,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.spec.pid
    }

    #[inline]
    pub fn arrival_time(&self) -> Tick {
        self.spec.arrival_time
    }

    #[inline]
    pub fn burst_time(&self) -> Tick {
        self.spec.burst_time
    }

    #[inline]
    pub fn comeback_delay(&self) -> Tick {
        self.spec.comeback_delay
    }

    #[inline]
    pub fn original_priority(&self) -> Priority {
        self.spec.priority
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline]
    pub fn remaining_time(&self) -> Tick {
        self.remaining_time
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline]
    pub fn ready_queue_time(&self) -> Tick {
        self.ready_queue_time
    }

    #[inline]
    pub fn deployment_time(&self) -> Tick {
        self.deployment_time
    }

    /// Ticks accumulated in the ready queue across every dispatch
    #[inline]
    pub fn waiting_time(&self) -> Tick {
        self.waiting_time
    }

    #[inline]
    pub fn finish_time(&self) -> Tick {
        self.finish_time
    }

    #[inline]
    pub fn interrupt_time(&self) -> Tick {
        self.interrupt_time
    }

    #[inline]
    pub fn executed_ticks(&self) -> Tick {
        self.executed_ticks
    }

    #[inline]
    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Interval from arrival to the latest completion or preemption
    ///
    /// Signed: the first listed process runs from tick 0 whatever its
    /// declared arrival, so its turnaround can be negative.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.has_run
            .then(|| i64::from(self.interrupt_time) - i64::from(self.spec.arrival_time))
    }

    pub fn summary(&self) -> ProcessSummary {
        ProcessSummary {
            pid: self.pid(),
            has_run: self.has_run,
            waiting_time: self.waiting_time,
            turnaround_time: self.turnaround_time(),
            executed_ticks: self.executed_ticks,
        }
    }

    /// One tick of CPU time, floored at zero remaining
    pub(crate) fn consume_tick(&mut self) {
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.executed_ticks += 1;
    }

    /// Aging step, floored at zero
    pub(crate) fn decrement_priority(&mut self) {
        self.priority = self.priority.saturating_sub(1);
    }

    pub(crate) fn enter_ready(&mut self, tick: Tick) {
        self.ready_queue_time = tick;
        self.state = ProcessState::Ready;
    }

    /// Start occupying the CPU, charging the time spent in the ready queue
    pub(crate) fn dispatch(&mut self, tick: Tick) {
        self.waiting_time += tick.saturating_sub(self.ready_queue_time);
        self.deployment_time = tick;
        self.has_run = true;
        self.state = ProcessState::Running;
    }

    /// Dispatch at tick 0 without passing through the ready queue
    pub(crate) fn dispatch_initial(&mut self) {
        self.deployment_time = 0;
        self.has_run = true;
        self.state = ProcessState::Running;
    }

    pub(crate) fn complete(&mut self, tick: Tick) {
        self.finish_time = tick;
        self.interrupt_time = tick;
        self.state = ProcessState::Waiting;
    }

    /// Taken off the CPU and put straight back in the ready queue
    pub(crate) fn preempt(&mut self, tick: Tick) {
        self.interrupt_time = tick;
        self.enter_ready(tick);
    }

    /// Stop at the horizon while still running
    pub(crate) fn halt(&mut self, tick: Tick) {
        self.finish_time = tick;
        self.interrupt_time = tick;
    }

    /// Comeback tick past `Tick::MAX` never comes
    pub(crate) fn comeback_due(&self, tick: Tick) -> bool {
        self.finish_time.checked_add(self.spec.comeback_delay) == Some(tick)
    }

    /// Start a new generation after the comeback delay
    pub(crate) fn comeback(&mut self, tick: Tick) {
        self.remaining_time = self.spec.burst_time;
        self.priority = self.spec.priority;
        self.enter_ready(tick);
    }
}
