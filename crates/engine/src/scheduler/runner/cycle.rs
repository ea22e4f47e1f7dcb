use tracing::{debug, info};

use crate::scheduler::metrics::SnapshotView;
use crate::scheduler::timeline::MetricsSnapshot;
use crate::scheduler::types::CycleResult;

use super::Scheduler;

impl Scheduler {
    /// Run one scheduling cycle: sample load, adapt every priority, then
    /// select and execute one slice of the most urgent task.
    ///
    /// An empty active set is an idle cycle: load is still sampled, nothing
    /// is appended to the timeline and `executed_task` is `None`.
    pub fn run_cycle(&mut self) -> CycleResult {
        self.clock += 1;
        let cycle = self.clock;

        let load = self.monitor.sample(self.rng.as_mut());
        let load_level = self.adapter.adapt(load, &mut self.tasks);
        self.load = load;
        self.load_level = load_level;
        self.metrics.record_cycle(load, load_level);
        debug!(cycle, load, ?load_level, active = self.tasks.len(), "Cycle started");

        let Some(idx) = self.selector.select(&self.tasks) else {
            self.metrics.record_idle();
            debug!(cycle, "No active tasks, idling");
            return CycleResult {
                cycle,
                load,
                load_level,
                executed_task: None,
                slice: 0,
                completed: false,
            };
        };

        let slice = self.selector.execute(&mut self.tasks[idx], self.rng.as_mut());
        let task = &self.tasks[idx];
        self.timeline.record(MetricsSnapshot {
            timestamp: cycle,
            task_id: task.id,
            dynamic_priority: task.dynamic_priority,
            remaining_time: task.remaining_time,
        });
        self.metrics.record_execution(task.id, slice);
        debug!(cycle, task_id = task.id, slice, remaining = task.remaining_time, "Executed slice");

        let completed = task.is_completed();
        let executed = if completed {
            let done = self.tasks.remove(idx);
            self.completed.insert(done.id);
            self.metrics.record_completion();
            info!(cycle, task_id = done.id, executed = done.executed_time, "Task {} completed", done.id);
            done
        } else {
            task.clone()
        };

        CycleResult {
            cycle,
            load,
            load_level,
            executed_task: Some(executed),
            slice,
            completed,
        }
    }

    /// Read-only view of the latest cycle for telemetry.
    pub fn snapshot(&self) -> SnapshotView {
        SnapshotView {
            cycle: self.clock,
            load: self.load,
            load_level: self.load_level,
            active_task_count: self.tasks.len(),
            timeline_tail: self.timeline.tail(self.config.timeline_tail).to_vec(),
        }
    }
}
