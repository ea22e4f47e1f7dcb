use adaptsched_core::Task;

use super::types::{LoadLevel, PriorityPolicy, assess_load};

/// Recomputes dynamic priorities from static priority, load and deadline.
#[derive(Debug, Clone, Default)]
pub struct PriorityAdapter {
    policy: PriorityPolicy,
}

impl PriorityAdapter {
    pub fn new(policy: PriorityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PriorityPolicy {
        &self.policy
    }

    /// Dynamic priority `task` should have under `level`.
    pub fn priority_for(&self, task: &Task, level: LoadLevel) -> i64 {
        task.static_priority
            .saturating_add(i64::from(self.policy.load_boost(level)))
            .saturating_add(i64::from(self.policy.deadline_boost(task.deadline)))
    }

    /// Reset and re-boost every task in place. Returns the load level used.
    ///
    /// Every task starts again from its static priority, so nothing from
    /// a previous cycle leaks into this one.
    pub fn adapt(&self, load: f64, tasks: &mut [Task]) -> LoadLevel {
        let level = assess_load(load, &self.policy);
        for task in tasks.iter_mut() {
            task.dynamic_priority = self.priority_for(task, level);
        }
        level
    }
}
