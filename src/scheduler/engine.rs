/*!
 * Scheduling Engine
 * Tick-stepped simulation loop parameterized by an algorithm variant
 */

use super::queue::ReadyQueue;
use super::stats::{RunCounters, SimulationReport};
use super::timeline::Timeline;
use super::types::{Algorithm, Preemption};
use crate::core::errors::SimulationError;
use crate::core::types::{Pid, SimResult, Tick};
use crate::process::{ProcessRecord, ProcessSpec};
use ahash::AHashSet;
use tracing::{debug, info, instrument, trace};

/// Read-only snapshot handed to observers at the end of every tick
#[derive(Debug)]
pub struct TickView<'a> {
    pub tick: Tick,
    pub running: Option<Pid>,
    /// Ready queue contents in dequeue order
    pub ready: Vec<Pid>,
    pub waiting: Vec<Pid>,
    pub processes: &'a [ProcessRecord],
}

/// Runs one algorithm over a process set up to a fixed horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    algorithm: Algorithm,
    horizon: Tick,
}

impl Simulator {
    pub fn new(algorithm: Algorithm, horizon: Tick) -> SimResult<Self> {
        if horizon == 0 {
            return Err(SimulationError::InvalidHorizon(horizon));
        }
        algorithm.validate()?;
        Ok(Self { algorithm, horizon })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn horizon(&self) -> Tick {
        self.horizon
    }

    /// Simulate `specs` from fresh process records
    pub fn run(&self, specs: &[ProcessSpec]) -> SimResult<SimulationReport> {
        self.run_observed(specs, |_| {})
    }

    /// Simulate `specs`, calling `observer` after tick 0 and after every
    /// loop tick
    #[instrument(skip_all, fields(algorithm = %self.algorithm.kind(), horizon = self.horizon))]
    pub fn run_observed<F>(
        &self,
        specs: &[ProcessSpec],
        mut observer: F,
    ) -> SimResult<SimulationReport>
    where
        F: FnMut(&TickView<'_>),
    {
        validate_specs(specs)?;

        let mut run = Run::new(self.algorithm, specs);
        run.start();
        observer(&run.view(0));

        for tick in 1..self.horizon {
            run.step(tick);
            observer(&run.view(tick));
        }

        let report = run.finish(self.horizon);
        info!(
            average_waiting = report.average_waiting_time,
            average_turnaround = report.average_turnaround_time,
            entries = report.timeline.len(),
            "Simulation complete"
        );
        Ok(report)
    }
}

/// Reject process sets the loop cannot run
pub fn validate_specs(specs: &[ProcessSpec]) -> SimResult<()> {
    if specs.is_empty() {
        return Err(SimulationError::EmptyProcessSet);
    }
    let mut seen = AHashSet::with_capacity(specs.len());
    for spec in specs {
        if !seen.insert(spec.pid) {
            return Err(SimulationError::DuplicatePid(spec.pid));
        }
        if spec.burst_time == 0 {
            return Err(SimulationError::InvalidBurst { pid: spec.pid });
        }
    }
    Ok(())
}

/// Mutable state of one run
struct Run {
    algorithm: Algorithm,
    processes: Vec<ProcessRecord>,
    ready: ReadyQueue,
    waiting: Vec<usize>,
    running: Option<usize>,
    timeline: Timeline,
    counters: RunCounters,
}

impl Run {
    fn new(algorithm: Algorithm, specs: &[ProcessSpec]) -> Self {
        Self {
            algorithm,
            processes: specs.iter().copied().map(ProcessRecord::new).collect(),
            ready: ReadyQueue::new(algorithm.ordering(), specs.len()),
            waiting: Vec::with_capacity(specs.len()),
            running: None,
            timeline: Timeline::new(),
            counters: RunCounters::default(),
        }
    }

    /// The first listed process holds the CPU from tick 0, whatever its
    /// declared arrival time
    fn start(&mut self) {
        self.processes[0].dispatch_initial();
        self.running = Some(0);
        self.counters.dispatches += 1;
        debug!(tick = 0, pid = self.processes[0].pid(), "Dispatched");
    }

    fn step(&mut self, tick: Tick) {
        if let Some(slot) = self.running {
            self.processes[slot].consume_tick();
        }

        if let Some(quantum) = self.algorithm.aging_quantum() {
            self.age(tick, quantum);
        }

        self.admit_arrival(tick);
        self.admit_comebacks(tick);

        // A process that just took the CPU is never preempted on the same tick
        let switched = self.check_completion(tick);
        if !switched {
            if let Some(rule) = self.algorithm.preemption() {
                self.check_preemption(tick, rule);
            }
        }
    }

    fn age(&mut self, tick: Tick, quantum: Tick) {
        let mut aged = 0;
        for slot in self.ready.slots() {
            let process = &mut self.processes[slot];
            if (tick - process.ready_queue_time()) % quantum == 0 && process.priority() > 0 {
                process.decrement_priority();
                aged += 1;
                trace!(tick, pid = process.pid(), priority = process.priority(), "Aged");
            }
        }
        if aged > 0 {
            self.ready.rekey(&self.processes);
            self.counters.priority_decrements += aged;
        }
    }

    /// Only the first matching process (from index 1 on) is admitted per tick
    fn admit_arrival(&mut self, tick: Tick) {
        let arrived = self
            .processes
            .iter()
            .skip(1)
            .position(|p| p.arrival_time() == tick)
            .map(|i| i + 1);

        if let Some(slot) = arrived {
            self.processes[slot].enter_ready(tick);
            self.ready.push(slot, &self.processes[slot]);
            debug!(tick, pid = self.processes[slot].pid(), "Arrived");
        }
    }

    fn admit_comebacks(&mut self, tick: Tick) {
        let processes = &self.processes;
        let (due, pending): (Vec<usize>, Vec<usize>) = self
            .waiting
            .drain(..)
            .partition(|&slot| processes[slot].comeback_due(tick));
        self.waiting = pending;

        for slot in due {
            self.processes[slot].comeback(tick);
            self.ready.push(slot, &self.processes[slot]);
            self.counters.comebacks += 1;
            debug!(tick, pid = self.processes[slot].pid(), "Came back");
        }
    }

    /// Returns true when the CPU changed hands (or went idle) this tick
    ///
    /// An idle CPU also picks up the ready queue head here, so work that
    /// arrives after the CPU went idle still gets dispatched.
    fn check_completion(&mut self, tick: Tick) -> bool {
        let running = self.running;
        match running {
            Some(slot) if self.processes[slot].remaining_time() == 0 => {
                let process = &mut self.processes[slot];
                self.timeline
                    .record(process.pid(), process.deployment_time(), tick);
                process.complete(tick);
                self.waiting.push(slot);
                self.running = None;
                self.counters.completions += 1;
                debug!(tick, pid = process.pid(), "Completed");

                self.dispatch_next(tick);
                true
            }
            Some(_) => false,
            None => self.dispatch_next(tick),
        }
    }

    fn check_preemption(&mut self, tick: Tick, rule: Preemption) {
        let (Some(current), Some(head)) = (self.running, self.ready.peek()) else {
            return;
        };
        if !rule.triggers(tick, &self.processes[current], &self.processes[head]) {
            return;
        }

        let outgoing = &mut self.processes[current];
        self.timeline
            .record(outgoing.pid(), outgoing.deployment_time(), tick);
        outgoing.preempt(tick);
        self.counters.preemptions += 1;
        debug!(tick, pid = outgoing.pid(), rule = ?rule, "Preempted");

        // Head leaves before the outgoing process rejoins; with a non-empty
        // queue this picks the same process as rejoining first would
        self.running = None;
        self.dispatch_next(tick);
        self.ready.push(current, &self.processes[current]);
    }

    /// Move the ready queue head onto the CPU; false when the queue is empty
    fn dispatch_next(&mut self, tick: Tick) -> bool {
        let Some(slot) = self.ready.pop() else {
            return false;
        };
        let process = &mut self.processes[slot];
        process.dispatch(tick);
        self.running = Some(slot);
        self.counters.dispatches += 1;
        debug!(
            tick,
            pid = process.pid(),
            waited = process.waiting_time(),
            queued = self.ready.len(),
            "Dispatched"
        );
        true
    }

    fn view(&self, tick: Tick) -> TickView<'_> {
        TickView {
            tick,
            running: self.running.map(|slot| self.processes[slot].pid()),
            ready: self
                .ready
                .slots()
                .into_iter()
                .map(|slot| self.processes[slot].pid())
                .collect(),
            waiting: self
                .waiting
                .iter()
                .map(|&slot| self.processes[slot].pid())
                .collect(),
            processes: &self.processes,
        }
    }

    fn finish(mut self, horizon: Tick) -> SimulationReport {
        if let Some(slot) = self.running.take() {
            let process = &mut self.processes[slot];
            self.timeline
                .record(process.pid(), process.deployment_time(), horizon);
            process.halt(horizon);
        }
        SimulationReport::new(
            self.algorithm,
            horizon,
            self.timeline,
            &self.processes,
            self.counters,
        )
    }
}
