mod cli;
mod config;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use adaptsched_core::config::{load_dotenv, Config, SimulationConfig};
use adaptsched_engine::scheduler::{FixedLoadMonitor, RandomLoadMonitor, WorkloadMonitor};
use adaptsched_engine::{
    RandomSource, ScheduledWorkload, Scheduler, SeededRandom, Simulation, TimelineExport,
    TracingSink,
};

use crate::cli::CliArgs;
use crate::config::SimulationFile;

fn main() -> Result<()> {
    load_dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let env_config = Config::from_env();
    env_config.log_summary();

    let file = SimulationFile::load(args.config.as_deref())
        .context("failed to load configuration")?;

    // Handle --print-config
    if args.print_config {
        print!("{}", file.to_toml()?);
        return Ok(());
    }

    let run = args.resolve(&env_config.simulation);
    let (scheduler_rng, workload_rng) = random_sources(&run);

    let monitor: Box<dyn WorkloadMonitor> = match run.fixed_load {
        Some(load) => Box::new(FixedLoadMonitor::new(load)),
        None => Box::new(RandomLoadMonitor),
    };

    let scheduler = Scheduler::new(file.scheduler.clone(), monitor, scheduler_rng);
    let mut simulation = Simulation::new(
        scheduler,
        ScheduledWorkload::new(file.workload.clone()),
        workload_rng,
    )
    .with_tick(Duration::from_millis(run.tick_ms));

    let summary = simulation
        .run(run.cycles, &mut TracingSink)
        .context("simulation aborted")?;

    if let Some(path) = &run.timeline_export {
        TimelineExport::new(&summary, simulation.scheduler())
            .write_json(path)
            .with_context(|| format!("failed to export timeline to {}", path.display()))?;
    }

    info!(
        run_id = %summary.run_id,
        cycles = summary.cycles_run,
        completed = ?summary.completed_task_ids,
        active = ?summary.active_task_ids,
        "Done"
    );
    Ok(())
}

/// Scheduler and workload get independent streams; a seed makes both reproducible.
fn random_sources(run: &SimulationConfig) -> (Box<dyn RandomSource>, Box<dyn RandomSource>) {
    match run.seed {
        Some(seed) => {
            info!(seed, "Seeded run");
            (
                Box::new(SeededRandom::new(seed)),
                Box::new(SeededRandom::new(seed.wrapping_add(1))),
            )
        }
        None => (
            Box::new(SeededRandom::from_entropy()),
            Box::new(SeededRandom::from_entropy()),
        ),
    }
}
