/*!
 * Invariant Tests
 * Property checks over randomly generated process sets
 */

use proptest::prelude::*;
use sched_sim::{
    Algorithm, AlgorithmKind, ProcessSpec, ProcessState, SimulationReport, Simulator, Tick,
};
use std::collections::HashMap;

fn spec_strategy() -> impl Strategy<Value = Vec<ProcessSpec>> {
    prop::collection::vec((0u32..20, 1u32..10, 0u32..10, 0u32..6), 1..7).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, comeback, priority))| {
                ProcessSpec::new(i as u32 + 1, arrival, burst)
                    .with_comeback(comeback)
                    .with_priority(priority)
            })
            .collect()
    })
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    (0usize..6, 1u32..5, 1u32..5).prop_map(|(index, quantum, aging)| {
        Algorithm::from_kind(AlgorithmKind::ALL[index], quantum, aging)
    })
}

fn check_timeline(report: &SimulationReport, horizon: Tick) -> Result<(), TestCaseError> {
    let mut previous_end = 0;
    for entry in report.timeline.iter() {
        prop_assert!(entry.start < entry.end);
        prop_assert!(entry.start >= previous_end);
        prop_assert!(entry.end <= horizon);
        previous_end = entry.end;
    }
    Ok(())
}

proptest! {
    #[test]
    fn timeline_is_ordered_and_matches_cpu_use(
        specs in spec_strategy(),
        algorithm in algorithm_strategy(),
        horizon in 1u32..80,
    ) {
        let report = Simulator::new(algorithm, horizon).unwrap().run(&specs).unwrap();
        check_timeline(&report, horizon)?;

        // the slot still held at the horizon is closed without being consumed
        let executed: Tick = report.processes.iter().map(|p| p.executed_ticks).sum();
        let held_at_horizon = report.timeline.iter().last().map_or(false, |e| e.end == horizon);
        prop_assert_eq!(report.timeline.busy_ticks(), executed + Tick::from(held_at_horizon));
    }

    #[test]
    fn each_process_is_in_exactly_one_place(
        specs in spec_strategy(),
        algorithm in algorithm_strategy(),
        horizon in 1u32..60,
    ) {
        let sim = Simulator::new(algorithm, horizon).unwrap();
        let mut failure = None;
        sim.run_observed(&specs, |view| {
            let mut seen: HashMap<u32, ProcessState> = HashMap::new();
            let running = view.running.into_iter().map(|pid| (pid, ProcessState::Running));
            let ready = view.ready.iter().map(|&pid| (pid, ProcessState::Ready));
            let waiting = view.waiting.iter().map(|&pid| (pid, ProcessState::Waiting));
            for (pid, place) in running.chain(ready).chain(waiting) {
                if seen.insert(pid, place).is_some() && failure.is_none() {
                    failure = Some(format!("tick {}: pid {} in two places", view.tick, pid));
                }
            }
            for process in view.processes {
                let expected = seen.get(&process.pid()).copied().unwrap_or(ProcessState::Created);
                if process.state() != expected && failure.is_none() {
                    failure = Some(format!(
                        "tick {}: pid {} is {:?}, expected {:?}",
                        view.tick, process.pid(), process.state(), expected
                    ));
                }
            }
        })
        .unwrap();
        prop_assert!(failure.is_none(), "{}", failure.unwrap_or_default());
    }

    #[test]
    fn averages_match_summaries(
        specs in spec_strategy(),
        algorithm in algorithm_strategy(),
        horizon in 1u32..80,
    ) {
        let report = Simulator::new(algorithm, horizon).unwrap().run(&specs).unwrap();
        let executed: Vec<_> = report.processes.iter().filter(|p| p.has_run).collect();
        prop_assert!(!executed.is_empty());

        let waiting: f64 = executed.iter().map(|p| f64::from(p.waiting_time)).sum::<f64>()
            / executed.len() as f64;
        let turnaround: f64 = executed
            .iter()
            .map(|p| p.turnaround_time.unwrap() as f64)
            .sum::<f64>()
            / executed.len() as f64;
        prop_assert!((report.average_waiting_time - waiting).abs() < 1e-9);
        prop_assert!((report.average_turnaround_time - turnaround).abs() < 1e-9);

        for process in report.processes.iter().filter(|p| !p.has_run) {
            prop_assert_eq!(process.turnaround_time, None);
            prop_assert_eq!(process.waiting_time, 0);
        }
    }

    #[test]
    fn runs_are_deterministic_and_isolated(
        specs in spec_strategy(),
        algorithm in algorithm_strategy(),
        horizon in 1u32..80,
    ) {
        let sim = Simulator::new(algorithm, horizon).unwrap();
        let first = sim.run(&specs).unwrap();

        // a different algorithm in between must not leak state
        let other = Simulator::new(Algorithm::RoundRobin { quantum: 1 }, horizon).unwrap();
        other.run(&specs).unwrap();

        prop_assert_eq!(first, sim.run(&specs).unwrap());
    }

    #[test]
    fn aging_lowers_priority_on_schedule(
        specs in spec_strategy(),
        aging in 1u32..5,
        preemptive in any::<bool>(),
        horizon in 1u32..60,
    ) {
        let algorithm = if preemptive {
            Algorithm::PreemptivePriority { aging_quantum: aging }
        } else {
            Algorithm::NonPreemptivePriority { aging_quantum: aging }
        };
        let sim = Simulator::new(algorithm, horizon).unwrap();

        // (pid -> (ready queue time, priority)) for processes ready at the previous tick
        let mut previous: HashMap<u32, (Tick, u32)> = HashMap::new();
        let mut failure = None;
        sim.run_observed(&specs, |view| {
            let mut current = HashMap::new();
            for &pid in &view.ready {
                let process = view.processes.iter().find(|p| p.pid() == pid).unwrap();
                let entry = (process.ready_queue_time(), process.priority());
                if let Some(&(since, before)) = previous.get(&pid) {
                    if since == entry.0 {
                        let due = (view.tick - since) % aging == 0;
                        let expected = if due { before.saturating_sub(1) } else { before };
                        if entry.1 != expected && failure.is_none() {
                            failure = Some(format!(
                                "tick {}: pid {} priority {} expected {}",
                                view.tick, pid, entry.1, expected
                            ));
                        }
                    }
                }
                current.insert(pid, entry);
            }
            previous = current;
        })
        .unwrap();
        prop_assert!(failure.is_none(), "{}", failure.unwrap_or_default());
    }

    #[test]
    fn fcfs_dispatches_in_input_order(
        gaps in prop::collection::vec(1u32..6, 0..5),
        bursts in prop::collection::vec(1u32..8, 5),
        horizon in 1u32..80,
    ) {
        let mut arrival = 0;
        let mut specs = vec![ProcessSpec::new(1, 0, bursts[0])];
        for (i, gap) in gaps.iter().enumerate() {
            arrival += gap;
            specs.push(ProcessSpec::new(i as u32 + 2, arrival, bursts[i + 1]));
        }

        let report = Simulator::new(Algorithm::FirstComeFirstServed, horizon)
            .unwrap()
            .run(&specs)
            .unwrap();
        let order = report.timeline.dispatch_order();
        let expected: Vec<u32> = specs.iter().map(|s| s.pid).take(order.len()).collect();
        prop_assert_eq!(order, expected);
        prop_assert_eq!(report.counters.preemptions, 0);
    }
}
