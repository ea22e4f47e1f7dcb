use adaptsched_core::{LogicalTime, SchedError, SchedResult, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::random::RandomSource;

/// Supplies tasks to a simulation: a seed set, then arrivals between cycles.
pub trait WorkloadGenerator: Send {
    /// Tasks present before the first cycle.
    fn initial(&mut self, rng: &mut dyn RandomSource) -> SchedResult<Vec<Task>>;

    /// Tasks arriving before cycle `cycle` (0-based) runs.
    fn arrivals(&mut self, cycle: LogicalTime, rng: &mut dyn RandomSource) -> SchedResult<Vec<Task>>;
}

/// Static description of a seed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub id: TaskId,
    pub priority: i64,
    pub deadline: i64,
    pub exec_time: i64,
    pub period: i64,
}

impl TaskSpec {
    pub fn build(&self) -> SchedResult<Task> {
        Task::new(self.id, self.priority, self.deadline, self.exec_time, self.period)
    }
}

/// Inclusive integer range drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    pub min: u64,
    pub max: u64,
}

impl DrawRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn draw(&self, rng: &mut dyn RandomSource) -> u64 {
        rng.next_in_range(self.min, self.max)
    }
}

/// Workload shape, typically parsed from the `[workload]` TOML section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    #[serde(default = "default_seed_tasks")]
    pub seed_tasks: Vec<TaskSpec>,
    /// 0-based cycle indices before which one new task arrives.
    #[serde(default = "default_arrival_cycles")]
    pub arrival_cycles: Vec<LogicalTime>,
    /// Arriving task ids are `arrival_id_base + cycle`.
    #[serde(default = "default_arrival_id_base")]
    pub arrival_id_base: TaskId,
    #[serde(default = "default_priority_range")]
    pub priority: DrawRange,
    #[serde(default = "default_deadline_range")]
    pub deadline: DrawRange,
    #[serde(default = "default_exec_time_range")]
    pub exec_time: DrawRange,
    #[serde(default = "default_period_range")]
    pub period: DrawRange,
}

fn default_seed_tasks() -> Vec<TaskSpec> {
    vec![
        TaskSpec { id: 1, priority: 5, deadline: 100, exec_time: 50, period: 200 },
        TaskSpec { id: 2, priority: 3, deadline: 150, exec_time: 70, period: 300 },
        TaskSpec { id: 3, priority: 4, deadline: 80, exec_time: 30, period: 150 },
    ]
}
fn default_arrival_cycles() -> Vec<LogicalTime> { vec![3, 6, 9] }
fn default_arrival_id_base() -> TaskId { 10 }
fn default_priority_range() -> DrawRange { DrawRange::new(2, 6) }
fn default_deadline_range() -> DrawRange { DrawRange::new(50, 200) }
fn default_exec_time_range() -> DrawRange { DrawRange::new(30, 100) }
fn default_period_range() -> DrawRange { DrawRange::new(200, 400) }

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            seed_tasks: default_seed_tasks(),
            arrival_cycles: default_arrival_cycles(),
            arrival_id_base: default_arrival_id_base(),
            priority: default_priority_range(),
            deadline: default_deadline_range(),
            exec_time: default_exec_time_range(),
            period: default_period_range(),
        }
    }
}

/// Seed tasks plus one random arrival at each configured cycle.
#[derive(Debug, Clone, Default)]
pub struct ScheduledWorkload {
    config: WorkloadConfig,
}

impl ScheduledWorkload {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }
}

impl WorkloadGenerator for ScheduledWorkload {
    fn initial(&mut self, _rng: &mut dyn RandomSource) -> SchedResult<Vec<Task>> {
        self.config.seed_tasks.iter().map(TaskSpec::build).collect()
    }

    fn arrivals(&mut self, cycle: LogicalTime, rng: &mut dyn RandomSource) -> SchedResult<Vec<Task>> {
        if !self.config.arrival_cycles.contains(&cycle) {
            return Ok(Vec::new());
        }

        let c = &self.config;
        let id = c.arrival_id_base.checked_add(cycle).ok_or_else(|| {
            SchedError::Config(format!(
                "arrival id overflows: base {} + cycle {}",
                c.arrival_id_base, cycle
            ))
        })?;
        let task = Task::new(
            id,
            c.priority.draw(rng) as i64,
            c.deadline.draw(rng) as i64,
            c.exec_time.draw(rng) as i64,
            c.period.draw(rng) as i64,
        )?
        .arrived_at(cycle);
        debug!(cycle, task_id = task.id, "Generated arrival");
        Ok(vec![task])
    }
}
