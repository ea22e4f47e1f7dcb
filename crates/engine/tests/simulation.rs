//! End-to-end runs of the default workload through the simulation driver.

use adaptsched_core::SchedError;
use adaptsched_engine::scheduler::{FixedLoadMonitor, RandomLoadMonitor};
use adaptsched_engine::simulation::WorkloadConfig;
use adaptsched_engine::{
    RecordingSink, ScheduledWorkload, Scheduler, SchedulerConfig, SeededRandom, Simulation,
    TimelineExport, TracingSink,
};

fn seeded_simulation(seed: u64) -> Simulation<ScheduledWorkload> {
    let scheduler = Scheduler::with_seed(SchedulerConfig::default(), seed);
    Simulation::new(
        scheduler,
        ScheduledWorkload::default(),
        Box::new(SeededRandom::new(seed.wrapping_add(1))),
    )
}

fn fixed_load_simulation(load: f64, seed: u64, workload: WorkloadConfig) -> Simulation<ScheduledWorkload> {
    let scheduler = Scheduler::new(
        SchedulerConfig::default(),
        Box::new(FixedLoadMonitor::new(load)),
        Box::new(SeededRandom::new(seed)),
    );
    Simulation::new(
        scheduler,
        ScheduledWorkload::new(workload),
        Box::new(SeededRandom::new(seed)),
    )
}

#[test]
fn default_run_reports_every_cycle() {
    let mut sim = seeded_simulation(42);
    let mut sink = (TracingSink, RecordingSink::new());
    let summary = sim.run(20, &mut sink).unwrap();
    let recording = sink.1;

    assert_eq!(recording.seed, vec![1, 2, 3]);
    assert_eq!(recording.cycles.len(), 20);
    assert!(recording.finished);
    assert_eq!(summary.cycles_run, 20);
    assert_eq!(summary.run_id, sim.run_id());

    let arrivals: Vec<_> = recording
        .cycles
        .iter()
        .filter(|c| !c.arrivals.is_empty())
        .map(|c| (c.index, c.arrivals.clone()))
        .collect();
    assert_eq!(arrivals, vec![(3, vec![13]), (6, vec![16]), (9, vec![19])]);

    // one timeline entry per non-idle cycle
    let busy = recording.cycles.iter().filter(|c| !c.result.is_idle()).count();
    assert_eq!(recording.final_timeline_len, busy);
    assert_eq!(summary.timeline_len, busy);
    assert_eq!(summary.idle_cycles as usize, 20 - busy);
}

#[test]
fn earliest_deadline_seed_task_runs_and_finishes_first() {
    let mut sim = fixed_load_simulation(0.5, 7, WorkloadConfig::default());
    let mut sink = RecordingSink::new();
    sim.run(40, &mut sink).unwrap();

    assert_eq!(sink.executed_ids()[0], 3);
    let order = sink.completion_order();
    let pos = |id| order.iter().position(|&x| x == id);
    assert_eq!(pos(3), Some(0));
}

#[test]
fn completed_tasks_never_reappear() {
    let mut sim = seeded_simulation(99);
    let mut sink = RecordingSink::new();
    let summary = sim.run(60, &mut sink).unwrap();

    for (i, cycle) in sink.cycles.iter().enumerate() {
        if cycle.result.completed {
            let id = cycle.result.executed_task.as_ref().unwrap().id;
            for later in &sink.cycles[i + 1..] {
                assert!(!later.active.contains(&id));
                assert_ne!(later.result.executed_task.as_ref().map(|t| t.id), Some(id));
            }
        }
    }
    for id in &summary.completed_task_ids {
        assert!(!summary.active_task_ids.contains(id));
    }
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut sim = seeded_simulation(seed);
        let mut sink = RecordingSink::new();
        sim.run(25, &mut sink).unwrap();
        (sink.executed_ids(), sim.scheduler().timeline().clone())
    };

    assert_eq!(run(5), run(5));
}

#[test]
fn arrival_colliding_with_active_id_aborts() {
    let workload = WorkloadConfig {
        arrival_cycles: vec![1],
        arrival_id_base: 1,
        ..WorkloadConfig::default()
    };
    // cycle index 1 yields id 2, which is still active
    let mut sim = fixed_load_simulation(0.5, 3, workload);
    let err = sim.run(5, &mut RecordingSink::new()).unwrap_err();
    assert!(matches!(err, SchedError::DuplicateId(2)));
}

#[test]
fn arrival_reusing_completed_id_aborts() {
    let workload = WorkloadConfig {
        arrival_cycles: vec![3],
        arrival_id_base: 0,
        ..WorkloadConfig::default()
    };
    // task 3 runs first and needs at most three slices, so index 3 yields a finished id
    let mut sim = fixed_load_simulation(0.5, 3, workload);
    let err = sim.run(10, &mut RecordingSink::new()).unwrap_err();
    assert!(matches!(err, SchedError::TaskIdReused(3)));
}

#[test]
fn export_round_trips_through_disk() {
    let mut sim = seeded_simulation(11);
    let summary = sim.run(15, &mut RecordingSink::new()).unwrap();
    let scheduler = sim.into_scheduler();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs").join("timeline.json");
    let export = TimelineExport::new(&summary, &scheduler);
    export.write_json(&path).unwrap();

    let loaded = TimelineExport::read_json(&path).unwrap();
    assert_eq!(loaded.run_id, summary.run_id);
    assert_eq!(loaded.timeline, *scheduler.timeline());
    assert_eq!(loaded.summary, summary);
    assert_eq!(loaded.config, SchedulerConfig::default());
}

#[test]
fn random_monitor_samples_stay_in_band() {
    let scheduler = Scheduler::new(
        SchedulerConfig::default(),
        Box::new(RandomLoadMonitor),
        Box::new(SeededRandom::new(1234)),
    );
    let mut sim = Simulation::new(scheduler, ScheduledWorkload::default(), Box::new(SeededRandom::new(4321)));
    let mut sink = RecordingSink::new();
    sim.run(50, &mut sink).unwrap();

    for cycle in &sink.cycles {
        assert!((0.6..1.0).contains(&cycle.snapshot.load));
        assert_eq!(cycle.snapshot.load, cycle.result.load);
    }
}
