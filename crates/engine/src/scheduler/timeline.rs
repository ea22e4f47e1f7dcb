use adaptsched_core::{LogicalTime, TaskId};
use serde::{Deserialize, Serialize};

/// One execution event: which task ran, at what priority, and what was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: LogicalTime,
    pub task_id: TaskId,
    pub dynamic_priority: i64,
    pub remaining_time: u64,
}

/// Append-only, time-ordered history of execution events.
///
/// Only the scheduler appends; everyone else gets `&Timeline`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<MetricsSnapshot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, entry: MetricsSnapshot) {
        debug_assert!(
            self.entries.last().map_or(true, |last| last.timestamp <= entry.timestamp),
            "timeline entries must be appended in time order"
        );
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&MetricsSnapshot> {
        self.entries.last()
    }

    /// Iterate from the oldest entry. Each call starts over.
    pub fn iter(&self) -> std::slice::Iter<'_, MetricsSnapshot> {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> &[MetricsSnapshot] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Events for a single task, in time order.
    pub fn for_task(&self, task_id: TaskId) -> impl Iterator<Item = &MetricsSnapshot> + '_ {
        self.entries.iter().filter(move |e| e.task_id == task_id)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a MetricsSnapshot;
    type IntoIter = std::slice::Iter<'a, MetricsSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
