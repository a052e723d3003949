/*!
 * CPU Scheduling Simulator - Command Line Entry Point
 *
 * Runs one algorithm, all of them, or an interactive menu over the
 * configured process set and prints the Gantt chart and averages.
 */

use anyhow::Context;
use clap::Parser;
use sched_sim::{
    init_tracing, AlgorithmKind, ChartStyle, ReportView, SimConfig, SimulationError,
    SimulationReport, Simulator, Tick,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "sched-sim", version, about = "CPU scheduling algorithm simulator")]
struct Cli {
    /// Algorithm to run: fcfs, sjf, srtf, rr, priority, np-priority
    #[arg(short, long, conflicts_with = "all")]
    algorithm: Option<AlgorithmKind>,

    /// Run every algorithm in turn
    #[arg(long)]
    all: bool,

    /// JSON config file (falls back to SCHED_SIM_CONFIG, then the demo set)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the simulation horizon
    #[arg(long)]
    horizon: Option<Tick>,

    /// Override the round robin time quantum
    #[arg(long)]
    quantum: Option<Tick>,

    /// Override the priority aging quantum
    #[arg(long)]
    aging_quantum: Option<Tick>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Disable ANSI styling
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn load_config(&self) -> Result<SimConfig, SimulationError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_path(path)?,
            None => SimConfig::load()?,
        };
        if let Some(horizon) = self.horizon {
            config.horizon = horizon;
        }
        if let Some(quantum) = self.quantum {
            config.time_quantum = quantum;
        }
        if let Some(aging_quantum) = self.aging_quantum {
            config.aging_quantum = aging_quantum;
        }
        Ok(config)
    }

    fn style(&self) -> ChartStyle {
        if self.no_color {
            ChartStyle::plain()
        } else {
            ChartStyle::default()
        }
    }
}

fn main() -> ExitCode {
    init_tracing("warn");
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast::<SimulationError>() {
                Ok(sim_err) => eprintln!("{:?}", miette::Report::new(sim_err)),
                Err(other) => eprintln!("Error: {other:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    info!(
        processes = config.processes.len(),
        horizon = config.horizon,
        "Configuration ready"
    );

    if cli.all {
        for kind in AlgorithmKind::ALL {
            emit(cli, &simulate(&config, kind)?)?;
        }
        return Ok(());
    }

    if let Some(kind) = cli.algorithm {
        return emit(cli, &simulate(&config, kind)?);
    }

    menu_loop(cli, &config)
}

fn simulate(config: &SimConfig, kind: AlgorithmKind) -> Result<SimulationReport, SimulationError> {
    Simulator::new(config.algorithm(kind), config.horizon)?.run(&config.processes)
}

fn emit(cli: &Cli, report: &SimulationReport) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, report).context("Failed to encode report")?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", ReportView::new(report, cli.style()))?;
    }
    Ok(())
}

/// Interactive selection; anything other than a listed number exits
fn menu_loop(cli: &Cli, config: &SimConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read selection")?;

        let kind = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(AlgorithmKind::from_menu_index);
        match kind {
            Some(kind) => emit(cli, &simulate(config, kind)?)?,
            None => {
                info!(input = line.trim(), "Menu exit requested");
                break;
            }
        }
    }

    println!("Terminating program...");
    Ok(())
}

fn print_menu() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "-----------Scheduling Algorithms------------")?;
    writeln!(stdout)?;
    for (i, kind) in AlgorithmKind::ALL.iter().enumerate() {
        writeln!(stdout, "{}) {}", i + 1, kind.title())?;
    }
    writeln!(stdout)?;
    writeln!(
        stdout,
        "Enter a number to choose an algorithm, other choice to exit."
    )?;
    stdout.flush()
}
