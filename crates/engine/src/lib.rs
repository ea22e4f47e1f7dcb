pub mod random;
pub mod scheduler;
pub mod simulation;

pub use random::{FixedRandom, RandomSource, ScriptedRandom, SeededRandom};
pub use scheduler::{
    CycleResult, LoadLevel, MetricsSnapshot, PriorityPolicy, Scheduler, SchedulerConfig,
    SchedulerMetrics, SnapshotView, Timeline, assess_load,
};
pub use simulation::{
    RecordingSink, ScheduledWorkload, Simulation, SimulationSummary, TelemetrySink,
    TimelineExport, TracingSink, WorkloadConfig, WorkloadGenerator,
};
