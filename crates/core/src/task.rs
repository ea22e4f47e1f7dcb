use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SchedError, SchedResult};

/// Unique task identifier. Assigned by the workload, never reused.
pub type TaskId = u64;

/// Logical simulation time, measured in scheduling cycles.
pub type LogicalTime = u64;

/// A simulated unit of work competing for the single core.
///
/// Fields are public for the engine's adaptation and execution passes;
/// nothing outside the scheduler should mutate an active task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Baseline urgency (higher = more urgent). Fixed at creation.
    pub static_priority: i64,
    /// Urgency recomputed every cycle from `static_priority`.
    pub dynamic_priority: i64,
    /// Simulated milliseconds until due.
    pub deadline: u64,
    pub remaining_time: u64,
    pub executed_time: u64,
    /// Periodic-task metadata. Not consulted by selection.
    pub period: u64,
    pub arrival_time: LogicalTime,
}

impl Task {
    /// Build a task, rejecting negative work, deadline or period.
    ///
    /// `dynamic_priority` starts equal to `static_priority` and
    /// `arrival_time` starts at cycle 0; see [`Task::arrived_at`].
    pub fn new(
        id: TaskId,
        static_priority: i64,
        deadline: i64,
        exec_time: i64,
        period: i64,
    ) -> SchedResult<Self> {
        let deadline = non_negative(id, "deadline", deadline)?;
        let exec_time = non_negative(id, "exec_time", exec_time)?;
        let period = non_negative(id, "period", period)?;

        Ok(Self {
            id,
            static_priority,
            dynamic_priority: static_priority,
            deadline,
            remaining_time: exec_time,
            executed_time: 0,
            period,
            arrival_time: 0,
        })
    }

    /// Stamp the logical cycle at which this task entered the system.
    pub fn arrived_at(mut self, cycle: LogicalTime) -> Self {
        self.arrival_time = cycle;
        self
    }

    /// Total work the task was created with.
    pub fn exec_time(&self) -> u64 {
        self.executed_time + self.remaining_time
    }

    pub fn is_completed(&self) -> bool {
        self.remaining_time == 0
    }

    /// Move up to `slice` units from remaining to executed work.
    /// Returns the units actually applied.
    pub fn apply_slice(&mut self, slice: u64) -> u64 {
        let applied = slice.min(self.remaining_time);
        self.executed_time += applied;
        self.remaining_time -= applied;
        applied
    }
}

fn non_negative(id: TaskId, field: &str, value: i64) -> SchedResult<u64> {
    u64::try_from(value).map_err(|_| {
        SchedError::InvalidTaskConfig(format!("task {}: {} must be >= 0, got {}", id, field, value))
    })
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task {}: Priority {} ({}), Deadline {}ms, Remaining {}ms",
            self.id, self.dynamic_priority, self.static_priority, self.deadline, self.remaining_time
        )
    }
}
