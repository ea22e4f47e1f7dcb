use std::collections::HashMap;

use adaptsched_core::{LogicalTime, TaskId};
use serde::Serialize;

use super::timeline::MetricsSnapshot;
use super::types::LoadLevel;

/// Run-level scheduler counters exposed to telemetry.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerMetrics {
    /// Cycles run so far, idle ones included.
    pub cycles: u64,
    /// Cycles that found no active task.
    pub idle_cycles: u64,
    /// Slices executed per task.
    pub slices_executed: HashMap<TaskId, u64>,
    /// Tasks that ran to completion.
    pub tasks_completed: u64,
    /// Mean units of work per executed slice.
    pub avg_slice: f64,
    /// Load sampled in the latest cycle.
    pub last_load: f64,
    pub current_load_level: LoadLevel,
}

impl Default for SchedulerMetrics {
    fn default() -> Self {
        Self {
            cycles: 0,
            idle_cycles: 0,
            slices_executed: HashMap::new(),
            tasks_completed: 0,
            avg_slice: 0.0,
            last_load: 0.0,
            current_load_level: LoadLevel::Normal,
        }
    }
}

impl SchedulerMetrics {
    /// Record the load observed at the start of a cycle.
    pub fn record_cycle(&mut self, load: f64, level: LoadLevel) {
        self.cycles += 1;
        self.last_load = load;
        self.current_load_level = level;
    }

    pub fn record_idle(&mut self) {
        self.idle_cycles += 1;
    }

    /// Record a slice applied to a task.
    pub fn record_execution(&mut self, task_id: TaskId, slice: u64) {
        *self.slices_executed.entry(task_id).or_default() += 1;

        // Incremental mean: new_avg = prev_avg + (slice - prev_avg) / count
        let count: u64 = self.slices_executed.values().sum();
        self.avg_slice += (slice as f64 - self.avg_slice) / count as f64;
    }

    pub fn record_completion(&mut self) {
        self.tasks_completed += 1;
    }

    /// Total slices executed across all tasks.
    pub fn total_slices(&self) -> u64 {
        self.slices_executed.values().sum()
    }
}

/// Read-only view handed to telemetry sinks after each cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotView {
    pub cycle: LogicalTime,
    pub load: f64,
    pub load_level: LoadLevel,
    pub active_task_count: usize,
    /// Most recent timeline entries, oldest first.
    pub timeline_tail: Vec<MetricsSnapshot>,
}

impl SnapshotView {
    /// The newest timeline entry, if any task has ever run.
    pub fn latest(&self) -> Option<&MetricsSnapshot> {
        self.timeline_tail.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics() {
        let m = SchedulerMetrics::default();
        assert_eq!(m.cycles, 0);
        assert_eq!(m.current_load_level, LoadLevel::Normal);
        assert_eq!(m.avg_slice, 0.0);
        assert!(m.slices_executed.is_empty());
    }

    #[test]
    fn record_executions_averages() {
        let mut m = SchedulerMetrics::default();
        m.record_execution(1, 10);
        m.record_execution(2, 30);
        m.record_execution(1, 20);

        assert_eq!(m.slices_executed[&1], 2);
        assert_eq!(m.slices_executed[&2], 1);
        assert_eq!(m.total_slices(), 3);
        assert!((m.avg_slice - 20.0).abs() < 1e-9, "expected 20, got {}", m.avg_slice);
    }

    #[test]
    fn cycle_and_idle_counters() {
        let mut m = SchedulerMetrics::default();
        m.record_cycle(0.9, LoadLevel::Critical);
        m.record_cycle(0.5, LoadLevel::Normal);
        m.record_idle();
        m.record_completion();

        assert_eq!(m.cycles, 2);
        assert_eq!(m.idle_cycles, 1);
        assert_eq!(m.tasks_completed, 1);
        assert_eq!(m.last_load, 0.5);
        assert_eq!(m.current_load_level, LoadLevel::Normal);
    }
}
