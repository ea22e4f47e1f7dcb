//! Adaptive single-core scheduler.
//!
//! Each cycle samples system load through a [`WorkloadMonitor`], lets the
//! [`PriorityAdapter`] recompute every task's dynamic priority, and has the
//! [`TaskSelector`] run the most urgent task for one slice. Executions are
//! appended to the [`Timeline`]; completed tasks leave the active set for good.

pub mod adapter;
pub mod metrics;
pub mod monitor;
pub mod runner;
pub mod selector;
pub mod timeline;
pub mod types;

pub use adapter::PriorityAdapter;
pub use metrics::{SchedulerMetrics, SnapshotView};
pub use monitor::{FixedLoadMonitor, RandomLoadMonitor, WorkloadMonitor};
pub use runner::Scheduler;
pub use selector::TaskSelector;
pub use timeline::{MetricsSnapshot, Timeline};
pub use types::{CycleResult, LoadLevel, PriorityPolicy, SchedulerConfig, assess_load};
