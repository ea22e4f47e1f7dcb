use std::cmp::Reverse;

use adaptsched_core::{LogicalTime, Task, TaskId};
use tracing::info;

use crate::scheduler::{CycleResult, SchedulerMetrics, SnapshotView, Timeline};

/// Everything a sink gets to see after one cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport<'a> {
    /// 0-based index of the cycle within the run.
    pub index: LogicalTime,
    /// Tasks admitted just before this cycle.
    pub arrivals: &'a [Task],
    pub result: &'a CycleResult,
    pub snapshot: &'a SnapshotView,
    /// Active tasks after the cycle, with this cycle's dynamic priorities.
    pub active: &'a [Task],
}

/// Consumer of scheduler telemetry. Has no way back into scheduling.
pub trait TelemetrySink: Send {
    /// Called once with the seed workload, before the first cycle.
    fn on_start(&mut self, _seed: &[Task]) {}

    fn on_cycle(&mut self, report: &CycleReport<'_>);

    /// Called once after the last cycle.
    fn on_finish(&mut self, _timeline: &Timeline, _metrics: &SchedulerMetrics) {}
}

/// Fans every event out to two sinks, left first.
impl<A: TelemetrySink, B: TelemetrySink> TelemetrySink for (A, B) {
    fn on_start(&mut self, seed: &[Task]) {
        self.0.on_start(seed);
        self.1.on_start(seed);
    }

    fn on_cycle(&mut self, report: &CycleReport<'_>) {
        self.0.on_cycle(report);
        self.1.on_cycle(report);
    }

    fn on_finish(&mut self, timeline: &Timeline, metrics: &SchedulerMetrics) {
        self.0.on_finish(timeline, metrics);
        self.1.on_finish(timeline, metrics);
    }
}

/// Writes a human-readable account of every cycle through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn on_start(&mut self, seed: &[Task]) {
        info!("Seed workload: {} tasks", seed.len());
        for task in seed {
            info!("  {}", task);
        }
    }

    fn on_cycle(&mut self, report: &CycleReport<'_>) {
        let result = report.result;
        info!("=== Cycle {} === load {:.0}% ({:?})", report.index + 1, result.load * 100.0, result.load_level);

        for task in report.arrivals {
            info!("Added new task: {}", task);
        }

        // highest dynamic priority first
        let mut ranked: Vec<&Task> = report.active.iter().collect();
        ranked.sort_by_key(|t| (Reverse(t.dynamic_priority), t.id));
        for task in ranked {
            info!("  {}", task);
        }

        match &result.executed_task {
            Some(task) if result.completed => {
                info!("Executed: {} (slice {}ms, completed)", task, result.slice)
            }
            Some(task) => info!("Executed: {} (slice {}ms)", task, result.slice),
            None => info!("Idle: no active tasks"),
        }
    }

    fn on_finish(&mut self, timeline: &Timeline, metrics: &SchedulerMetrics) {
        info!(
            cycles = metrics.cycles,
            idle = metrics.idle_cycles,
            completed = metrics.tasks_completed,
            slices = timeline.len(),
            avg_slice = metrics.avg_slice,
            "Simulation finished"
        );
    }
}

/// One cycle as kept by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCycle {
    pub index: LogicalTime,
    pub arrivals: Vec<TaskId>,
    pub result: CycleResult,
    pub snapshot: SnapshotView,
    pub active: Vec<TaskId>,
}

/// Keeps every report in memory for post-run analysis.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub seed: Vec<TaskId>,
    pub cycles: Vec<RecordedCycle>,
    pub finished: bool,
    pub final_timeline_len: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids executed, one per non-idle cycle, in order.
    pub fn executed_ids(&self) -> Vec<TaskId> {
        self.cycles
            .iter()
            .filter_map(|c| c.result.executed_task.as_ref().map(|t| t.id))
            .collect()
    }

    /// Ids in the order they completed.
    pub fn completion_order(&self) -> Vec<TaskId> {
        self.cycles
            .iter()
            .filter(|c| c.result.completed)
            .filter_map(|c| c.result.executed_task.as_ref().map(|t| t.id))
            .collect()
    }
}

impl TelemetrySink for RecordingSink {
    fn on_start(&mut self, seed: &[Task]) {
        self.seed = seed.iter().map(|t| t.id).collect();
    }

    fn on_cycle(&mut self, report: &CycleReport<'_>) {
        self.cycles.push(RecordedCycle {
            index: report.index,
            arrivals: report.arrivals.iter().map(|t| t.id).collect(),
            result: report.result.clone(),
            snapshot: report.snapshot.clone(),
            active: report.active.iter().map(|t| t.id).collect(),
        });
    }

    fn on_finish(&mut self, timeline: &Timeline, _metrics: &SchedulerMetrics) {
        self.finished = true;
        self.final_timeline_len = timeline.len();
    }
}
