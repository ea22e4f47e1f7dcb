use std::cmp::Reverse;

use adaptsched_core::Task;

use crate::random::RandomSource;

/// Picks the next task and runs it for one bounded slice.
///
/// Ordering is earliest deadline, then highest dynamic priority, then
/// lowest id. Only the slice size is random.
#[derive(Debug, Clone, Copy)]
pub struct TaskSelector {
    min_slice: u64,
    max_slice: u64,
}

impl Default for TaskSelector {
    fn default() -> Self {
        Self::new(10, 30)
    }
}

impl TaskSelector {
    pub fn new(min_slice: u64, max_slice: u64) -> Self {
        Self {
            min_slice,
            max_slice: max_slice.max(min_slice),
        }
    }

    /// Index of the most urgent task, or `None` for an empty set.
    pub fn select(&self, tasks: &[Task]) -> Option<usize> {
        tasks
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.deadline, Reverse(t.dynamic_priority), t.id))
            .map(|(idx, _)| idx)
    }

    /// Draw a slice and apply it to `task`. Returns the units executed.
    pub fn execute(&self, task: &mut Task, rng: &mut dyn RandomSource) -> u64 {
        let drawn = rng.next_in_range(self.min_slice, self.max_slice);
        task.apply_slice(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, SeededRandom};

    fn task(id: u64, deadline: i64, dynamic: i64) -> Task {
        let mut t = Task::new(id, dynamic, deadline, 50, 100).unwrap();
        t.dynamic_priority = dynamic;
        t
    }

    #[test]
    fn empty_set_is_idle() {
        assert_eq!(TaskSelector::default().select(&[]), None);
    }

    #[test]
    fn earliest_deadline_wins() {
        let tasks = vec![task(1, 100, 9), task(2, 80, 1), task(3, 150, 20)];
        assert_eq!(TaskSelector::default().select(&tasks), Some(1));
    }

    #[test]
    fn equal_deadlines_prefer_higher_priority() {
        let tasks = vec![task(1, 80, 3), task(2, 80, 7), task(3, 80, 5)];
        assert_eq!(TaskSelector::default().select(&tasks), Some(1));
    }

    #[test]
    fn full_tie_prefers_lowest_id() {
        let tasks = vec![task(9, 80, 5), task(4, 80, 5), task(6, 80, 5)];
        assert_eq!(TaskSelector::default().select(&tasks), Some(1));
    }

    #[test]
    fn selection_is_repeatable() {
        let tasks = vec![task(5, 60, 2), task(2, 60, 2), task(8, 90, 10)];
        let selector = TaskSelector::default();
        let first = selector.select(&tasks);
        for _ in 0..100 {
            assert_eq!(selector.select(&tasks), first);
        }
    }

    #[test]
    fn slice_is_capped_by_remaining() {
        let mut t = task(1, 50, 1);
        t.remaining_time = 7;
        let executed = TaskSelector::default().execute(&mut t, &mut FixedRandom::new(0.0, 25));
        assert_eq!(executed, 7);
        assert_eq!(t.remaining_time, 0);
        assert_eq!(t.executed_time, 7);
    }

    #[test]
    fn slices_fall_in_bounds() {
        let selector = TaskSelector::default();
        let mut rng = SeededRandom::new(17);
        for _ in 0..200 {
            let mut t = task(1, 50, 1);
            t.remaining_time = 1_000;
            let executed = selector.execute(&mut t, &mut rng);
            assert!((10..=30).contains(&executed));
            assert_eq!(t.executed_time + t.remaining_time, 1_000);
        }
    }
}
