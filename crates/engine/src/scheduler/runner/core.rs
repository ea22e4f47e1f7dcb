use std::collections::BTreeSet;

use adaptsched_core::{LogicalTime, SchedError, SchedResult, Task, TaskId};
use tracing::{debug, warn};

use crate::random::{RandomSource, SeededRandom};
use crate::scheduler::adapter::PriorityAdapter;
use crate::scheduler::metrics::SchedulerMetrics;
use crate::scheduler::monitor::{RandomLoadMonitor, WorkloadMonitor};
use crate::scheduler::selector::TaskSelector;
use crate::scheduler::timeline::Timeline;
use crate::scheduler::types::{LoadLevel, SchedulerConfig};

/// The adaptive scheduler. Owns the active task set, the timeline and
/// the randomness for a single simulation run.
///
/// One instance per run: nothing here is shared, and `run_cycle` takes
/// `&mut self`, so arrivals and snapshot reads can only happen between
/// cycles.
pub struct Scheduler {
    pub(super) config: SchedulerConfig,
    /// Active tasks in arrival order.
    pub(super) tasks: Vec<Task>,
    /// Ids of tasks that ran to completion.
    pub(super) completed: BTreeSet<TaskId>,
    pub(super) timeline: Timeline,
    pub(super) metrics: SchedulerMetrics,
    /// Load sampled in the latest cycle.
    pub(super) load: f64,
    pub(super) load_level: LoadLevel,
    /// Number of cycles run so far.
    pub(super) clock: LogicalTime,
    pub(super) adapter: PriorityAdapter,
    pub(super) selector: TaskSelector,
    pub(super) monitor: Box<dyn WorkloadMonitor>,
    pub(super) rng: Box<dyn RandomSource>,
}

impl Scheduler {
    /// Create a scheduler with an explicit load monitor and random source.
    pub fn new(
        config: SchedulerConfig,
        monitor: Box<dyn WorkloadMonitor>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let (min_slice, max_slice) = config.slice_bounds();
        Self {
            adapter: PriorityAdapter::new(config.policy.clone()),
            selector: TaskSelector::new(min_slice, max_slice),
            config,
            tasks: Vec::new(),
            completed: BTreeSet::new(),
            timeline: Timeline::new(),
            metrics: SchedulerMetrics::default(),
            load: 0.0,
            load_level: LoadLevel::Normal,
            clock: 0,
            monitor,
            rng,
        }
    }

    /// Random load monitor over a seeded `StdRng`.
    pub fn with_seed(config: SchedulerConfig, seed: u64) -> Self {
        Self::new(config, Box::new(RandomLoadMonitor), Box::new(SeededRandom::new(seed)))
    }

    /// Admit a task into the active set.
    ///
    /// Fails if the id is already active, or if a task with that id has
    /// already completed.
    pub fn add_task(&mut self, task: Task) -> SchedResult<()> {
        if self.tasks.iter().any(|t| t.id == task.id) {
            warn!(task_id = task.id, "Rejected task: id already active");
            return Err(SchedError::DuplicateId(task.id));
        }
        if self.completed.contains(&task.id) {
            warn!(task_id = task.id, "Rejected task: id already completed");
            return Err(SchedError::TaskIdReused(task.id));
        }

        debug!(task_id = task.id, arrival = task.arrival_time, "Task admitted: {}", task);
        self.tasks.push(task);
        Ok(())
    }

    /// Active tasks in arrival order.
    pub fn active_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up an active task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Ids of completed tasks, ascending.
    pub fn completed_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.completed.iter().copied()
    }

    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Full execution history, oldest first.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn metrics(&self) -> &SchedulerMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Load sampled in the latest cycle (0.0 before the first cycle).
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Number of cycles run so far.
    pub fn clock(&self) -> LogicalTime {
        self.clock
    }

    pub fn monitor_name(&self) -> &str {
        self.monitor.name()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("clock", &self.clock)
            .field("load", &self.load)
            .field("active", &self.tasks.len())
            .field("completed", &self.completed.len())
            .field("timeline_len", &self.timeline.len())
            .field("monitor", &self.monitor.name())
            .finish()
    }
}
