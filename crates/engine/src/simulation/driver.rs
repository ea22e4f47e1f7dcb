use std::time::Duration;

use adaptsched_core::{LogicalTime, SchedResult, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::random::RandomSource;
use crate::scheduler::Scheduler;

use super::telemetry::{CycleReport, TelemetrySink};
use super::workload::WorkloadGenerator;

/// Outcome of a finished simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub cycles_run: LogicalTime,
    pub idle_cycles: u64,
    pub tasks_completed: u64,
    pub completed_task_ids: Vec<TaskId>,
    /// Tasks still holding work when the run stopped.
    pub active_task_ids: Vec<TaskId>,
    pub timeline_len: usize,
}

/// Drives a [`Scheduler`] for a fixed number of cycles.
///
/// Between cycles it admits arrivals from the workload generator and
/// reports to the telemetry sink; neither ever runs inside a cycle.
pub struct Simulation<W: WorkloadGenerator> {
    scheduler: Scheduler,
    workload: W,
    /// Randomness for the workload only; the scheduler owns its own.
    rng: Box<dyn RandomSource>,
    tick: Duration,
    run_id: Uuid,
}

impl<W: WorkloadGenerator> Simulation<W> {
    pub fn new(scheduler: Scheduler, workload: W, rng: Box<dyn RandomSource>) -> Self {
        Self {
            scheduler,
            workload,
            rng,
            tick: Duration::ZERO,
            run_id: Uuid::new_v4(),
        }
    }

    /// Pause between cycles. Zero (the default) runs flat out.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn into_scheduler(self) -> Scheduler {
        self.scheduler
    }

    /// Seed the workload, then run `cycles` cycles. Call once per instance:
    /// a second call re-seeds and fails on the already-known ids.
    ///
    /// A rejected or invalid task aborts the run with its error.
    pub fn run(&mut self, cycles: u32, sink: &mut dyn TelemetrySink) -> SchedResult<SimulationSummary> {
        let started_at = Utc::now();
        info!(run_id = %self.run_id, cycles, monitor = self.scheduler.monitor_name(), "Simulation starting");

        let seed = self.workload.initial(self.rng.as_mut())?;
        for task in &seed {
            self.scheduler.add_task(task.clone())?;
        }
        sink.on_start(&seed);

        for index in 0..LogicalTime::from(cycles) {
            let arrivals = self.workload.arrivals(index, self.rng.as_mut())?;
            for task in &arrivals {
                info!(task_id = task.id, cycle = index, "Task arrived");
                self.scheduler.add_task(task.clone())?;
            }

            let result = self.scheduler.run_cycle();
            let snapshot = self.scheduler.snapshot();
            sink.on_cycle(&CycleReport {
                index,
                arrivals: &arrivals,
                result: &result,
                snapshot: &snapshot,
                active: self.scheduler.active_tasks(),
            });

            if !self.tick.is_zero() && index + 1 < LogicalTime::from(cycles) {
                std::thread::sleep(self.tick);
            }
        }

        sink.on_finish(self.scheduler.timeline(), self.scheduler.metrics());

        let metrics = self.scheduler.metrics();
        let summary = SimulationSummary {
            run_id: self.run_id,
            started_at,
            cycles_run: metrics.cycles,
            idle_cycles: metrics.idle_cycles,
            tasks_completed: metrics.tasks_completed,
            completed_task_ids: self.scheduler.completed_ids().collect(),
            active_task_ids: self.scheduler.active_tasks().iter().map(|t| t.id).collect(),
            timeline_len: self.scheduler.timeline().len(),
        };
        info!(
            run_id = %self.run_id,
            completed = summary.tasks_completed,
            still_active = summary.active_task_ids.len(),
            "Simulation stopped"
        );
        Ok(summary)
    }
}
