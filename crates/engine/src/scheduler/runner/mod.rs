//! Scheduler runner -- owns the task set and drives cycles.
//!
//! Split into focused submodules:
//! - `core`: Scheduler struct, constructors, task admission, and accessors
//! - `cycle`: the per-cycle monitor/adapt/select/execute pipeline and snapshots

mod core;
mod cycle;

pub use self::core::Scheduler;
