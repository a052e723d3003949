/*!
 * Timeline
 * Gantt chart entries recording CPU occupancy
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Serialize};

/// Contiguous interval `[start, end)` during which one process held the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GanttEntry {
    pub pid: Pid,
    pub start: Tick,
    pub end: Tick,
}

impl GanttEntry {
    #[inline]
    pub const fn len(&self) -> Tick {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Chronological, non-overlapping Gantt entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<GanttEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close an interval; callers emit them in chronological order
    pub(crate) fn record(&mut self, pid: Pid, start: Tick, end: Tick) {
        debug_assert!(start < end, "empty gantt entry {pid}: {start}..{end}");
        debug_assert!(
            self.entries.last().map_or(true, |last| last.end <= start),
            "overlapping gantt entry {pid}: {start}..{end}"
        );
        self.entries.push(GanttEntry { pid, start, end });
    }

    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &GanttEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total ticks the CPU was occupied
    pub fn busy_ticks(&self) -> Tick {
        self.entries.iter().map(GanttEntry::len).sum()
    }

    /// Ticks within `[0, horizon)` with no process on the CPU
    pub fn idle_ticks(&self, horizon: Tick) -> Tick {
        horizon.saturating_sub(self.busy_ticks())
    }

    /// Pids in dispatch order, one per entry
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.entries.iter().map(|e| e.pid).collect()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a GanttEntry;
    type IntoIter = std::slice::Iter<'a, GanttEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
