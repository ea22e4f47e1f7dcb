use std::path::PathBuf;

use adaptsched_core::config::SimulationConfig;
use clap::Parser;

/// Adaptive priority scheduler simulation.
///
/// Runs a single-core scheduler that boosts task priorities under load and
/// near deadlines, logging every cycle. Flags override environment config
/// (`SIM_*` variables, optionally profiled via `ADAPTSCHED_PROFILE`).
#[derive(Parser, Debug, Default)]
#[command(name = "adaptsched", version, about = "Adaptive priority scheduler simulation")]
pub struct CliArgs {
    /// Number of scheduling cycles to run
    #[arg(long)]
    pub cycles: Option<u32>,

    /// RNG seed for reproducible runs (default: OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between cycles in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Replace the sampled load with a constant in [0, 1]
    #[arg(long, value_parser = parse_load)]
    pub fixed_load: Option<f64>,

    /// Path to config file (default: ~/.config/adaptsched/config.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Write the run's timeline as JSON to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the resolved scheduler/workload config as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Parse a load fraction, rejecting NaN, infinities and values outside [0, 1].
fn parse_load(s: &str) -> Result<f64, String> {
    let load: f64 = s.parse().map_err(|e| format!("invalid load '{}': {}", s, e))?;
    if load.is_finite() && (0.0..=1.0).contains(&load) {
        Ok(load)
    } else {
        Err(format!("load must be within [0, 1], got {}", s))
    }
}

impl CliArgs {
    /// Apply flag overrides on top of the environment-derived settings.
    pub fn resolve(&self, env: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            cycles: self.cycles.unwrap_or(env.cycles),
            seed: self.seed.or(env.seed),
            tick_ms: self.tick_ms.unwrap_or(env.tick_ms),
            timeline_export: self.export.clone().or_else(|| env.timeline_export.clone()),
            fixed_load: self.fixed_load.or(env.fixed_load),
        }
    }
}
