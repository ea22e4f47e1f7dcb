//! Simulation collaborators around the scheduler: a workload generator
//! that seeds and injects tasks, telemetry sinks that observe each cycle,
//! the driver loop, and the JSON timeline export.

pub mod driver;
pub mod export;
pub mod telemetry;
pub mod workload;

pub use driver::{Simulation, SimulationSummary};
pub use export::TimelineExport;
pub use telemetry::{CycleReport, RecordedCycle, RecordingSink, TelemetrySink, TracingSink};
pub use workload::{DrawRange, ScheduledWorkload, TaskSpec, WorkloadConfig, WorkloadGenerator};
