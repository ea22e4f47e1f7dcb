use adaptsched_core::{LogicalTime, Task};
use serde::{Deserialize, Serialize};

/// Coarse system load bucket, derived from the sampled load estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadLevel {
    /// No load boost.
    Normal,
    /// Moderate boost for every task.
    Elevated,
    /// Full boost for every task.
    Critical,
}

/// Assess the load level of a sampled load estimate.
pub fn assess_load(load: f64, policy: &PriorityPolicy) -> LoadLevel {
    if load > policy.critical_load {
        LoadLevel::Critical
    } else if load > policy.elevated_load {
        LoadLevel::Elevated
    } else {
        LoadLevel::Normal
    }
}

/// Thresholds and boosts used to derive dynamic priorities.
///
/// Boosts are unsigned: adaptation can only raise a task above its
/// static priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityPolicy {
    /// Load strictly above this is `Critical`.
    #[serde(default = "default_critical_load")]
    pub critical_load: f64,
    #[serde(default = "default_critical_boost")]
    pub critical_boost: u32,
    /// Load strictly above this (and not critical) is `Elevated`.
    #[serde(default = "default_elevated_load")]
    pub elevated_load: f64,
    #[serde(default = "default_elevated_boost")]
    pub elevated_boost: u32,
    /// Deadlines strictly below this get the urgent boost.
    #[serde(default = "default_urgent_deadline")]
    pub urgent_deadline: u64,
    #[serde(default = "default_urgent_boost")]
    pub urgent_boost: u32,
    /// Deadlines strictly below this (and not urgent) get the near boost.
    #[serde(default = "default_near_deadline")]
    pub near_deadline: u64,
    #[serde(default = "default_near_boost")]
    pub near_boost: u32,
}

fn default_critical_load() -> f64 { 0.8 }
fn default_critical_boost() -> u32 { 2 }
fn default_elevated_load() -> f64 { 0.6 }
fn default_elevated_boost() -> u32 { 1 }
fn default_urgent_deadline() -> u64 { 50 }
fn default_urgent_boost() -> u32 { 3 }
fn default_near_deadline() -> u64 { 100 }
fn default_near_boost() -> u32 { 1 }

impl Default for PriorityPolicy {
    fn default() -> Self {
        Self {
            critical_load: default_critical_load(),
            critical_boost: default_critical_boost(),
            elevated_load: default_elevated_load(),
            elevated_boost: default_elevated_boost(),
            urgent_deadline: default_urgent_deadline(),
            urgent_boost: default_urgent_boost(),
            near_deadline: default_near_deadline(),
            near_boost: default_near_boost(),
        }
    }
}

impl PriorityPolicy {
    /// Priority boost applied to every task at the given load level.
    pub fn load_boost(&self, level: LoadLevel) -> u32 {
        match level {
            LoadLevel::Critical => self.critical_boost,
            LoadLevel::Elevated => self.elevated_boost,
            LoadLevel::Normal => 0,
        }
    }

    /// Priority boost for a task with the given deadline.
    pub fn deadline_boost(&self, deadline: u64) -> u32 {
        if deadline < self.urgent_deadline {
            self.urgent_boost
        } else if deadline < self.near_deadline {
            self.near_boost
        } else {
            0
        }
    }
}

/// Scheduler configuration, typically parsed from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Smallest execution slice drawn per cycle.
    #[serde(default = "default_min_slice")]
    pub min_slice: u64,
    /// Largest execution slice drawn per cycle (inclusive).
    #[serde(default = "default_max_slice")]
    pub max_slice: u64,
    /// Number of recent timeline entries carried in each snapshot.
    #[serde(default = "default_timeline_tail")]
    pub timeline_tail: usize,
    #[serde(default)]
    pub policy: PriorityPolicy,
}

fn default_min_slice() -> u64 { 10 }
fn default_max_slice() -> u64 { 30 }
fn default_timeline_tail() -> usize { 5 }

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_slice: default_min_slice(),
            max_slice: default_max_slice(),
            timeline_tail: default_timeline_tail(),
            policy: PriorityPolicy::default(),
        }
    }
}

impl SchedulerConfig {
    /// Slice bounds as `(low, high)`, with `high` never below `low`.
    pub fn slice_bounds(&self) -> (u64, u64) {
        (self.min_slice, self.max_slice.max(self.min_slice))
    }
}

/// Outcome of one scheduling cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleResult {
    /// Logical time of the cycle (1-based; 0 means no cycle has run).
    pub cycle: LogicalTime,
    pub load: f64,
    pub load_level: LoadLevel,
    /// State of the executed task after its slice, or `None` when idle.
    pub executed_task: Option<Task>,
    /// Units of work applied this cycle.
    pub slice: u64,
    /// Whether the executed task finished and left the active set.
    pub completed: bool,
}

impl CycleResult {
    pub fn is_idle(&self) -> bool {
        self.executed_task.is_none()
    }
}
