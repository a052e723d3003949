/*!
 * Console Rendering
 * Gantt chart and summary output for simulation reports
 */

use crate::scheduler::{SimulationReport, Timeline};
use std::fmt;

const BOLD: &str = "\u{1b}[1m";
const RED_BOLD: &str = "\u{1b}[31m\u{1b}[1m";
const RED: &str = "\u{1b}[31m";
const RESET: &str = "\u{1b}[0m";
const RULE_WIDTH: usize = 83;

/// Presentation options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Emit ANSI bold/red escapes
    pub color: bool,
    /// Gantt entries per output line
    pub per_line: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            color: true,
            per_line: 5,
        }
    }
}

impl ChartStyle {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.color {
            code
        } else {
            ""
        }
    }
}

/// Gantt entries laid out `start |Pn| end`, wrapped every `per_line`
pub struct GanttChart<'a> {
    timeline: &'a Timeline,
    style: ChartStyle,
}

impl<'a> GanttChart<'a> {
    pub fn new(timeline: &'a Timeline, style: ChartStyle) -> Self {
        Self { timeline, style }
    }
}

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bold, red, reset) = (
            self.style.paint(BOLD),
            self.style.paint(RED),
            self.style.paint(RESET),
        );
        let per_line = self.style.per_line.max(1);

        for (i, entry) in self.timeline.iter().enumerate() {
            let label = format!("P{}", entry.pid);
            write!(
                f,
                "{bold}{:<3}{red} |{:<2}|{reset} {bold}{:<3}",
                entry.start, label, entry.end
            )?;
            if (i + 1) % per_line == 0 {
                writeln!(f)?;
            } else {
                f.write_str("\t")?;
            }
        }
        f.write_str(reset)
    }
}

/// Full report: header, chart, per-process waiting times and averages
pub struct ReportView<'a> {
    report: &'a SimulationReport,
    style: ChartStyle,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a SimulationReport, style: ChartStyle) -> Self {
        Self { report, style }
    }
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (bold, title, reset) = (
            self.style.paint(BOLD),
            self.style.paint(RED_BOLD),
            self.style.paint(RESET),
        );
        let rule = "_".repeat(RULE_WIDTH);

        writeln!(f, "Outputs for {}", self.report.algorithm)?;
        writeln!(f)?;
        writeln!(f, "{title}Gantt Chart{reset} : ")?;
        writeln!(f, "{bold}{rule}")?;
        writeln!(f, "{}", GanttChart::new(&self.report.timeline, self.style))?;
        writeln!(f, "{bold}{rule}{reset}")?;

        for process in &self.report.processes {
            writeln!(f, "P{} Waiting time {}", process.pid, process.waiting_time)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{title}Average waiting time{reset} : {bold}{:?}{reset}",
            self.report.average_waiting_time
        )?;
        writeln!(
            f,
            "{title}Average turnaround time{reset} : {bold}{:?}{reset}",
            self.report.average_turnaround_time
        )?;
        writeln!(
            f,
            "{title}CPU utilization{reset} : {bold}{:.2}%{reset}",
            self.report.cpu_utilization() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessSpec;
    use crate::scheduler::{run, Algorithm};

    #[test]
    fn test_plain_chart_wraps() {
        let mut timeline = Timeline::new();
        for i in 0..6 {
            timeline.record(i + 1, i * 2, i * 2 + 2);
        }
        let chart = GanttChart::new(
            &timeline,
            ChartStyle {
                color: false,
                per_line: 5,
            },
        )
        .to_string();

        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0   |P1| 2  \t2   |P2| 4"));
        assert_eq!(lines[1], "10  |P6| 12 \t");
        assert!(!chart.contains('\u{1b}'));
    }

    #[test]
    fn test_report_lists_averages() {
        let report = run(&[ProcessSpec::new(1, 0, 5)], 10, Algorithm::FirstComeFirstServed)
            .unwrap();
        let text = ReportView::new(&report, ChartStyle::plain()).to_string();
        assert!(text.starts_with("Outputs for First Come First Serve"));
        assert!(text.contains("P1 Waiting time 0"));
        assert!(text.contains("Average waiting time : 0.0\n"));
        assert!(text.contains("Average turnaround time : 5.0\n"));
        assert!(text.contains("CPU utilization : 50.00%"));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let report = run(&[ProcessSpec::new(1, 0, 5)], 10, Algorithm::FirstComeFirstServed)
            .unwrap();
        let text = ReportView::new(&report, ChartStyle::default()).to_string();
        assert!(text.contains(RED_BOLD));
    }
}
