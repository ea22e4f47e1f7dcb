use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub simulation: SimulationConfig,
}

/// Well-known env keys that identify a profile when prefixed.
const PROFILE_MARKER_KEYS: &[&str] = &["SIM_CYCLES", "SIM_SEED", "SIM_TICK_MS"];

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `ADAPTSCHED_PROFILE`. When set (e.g. `BENCH`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("ADAPTSCHED_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            simulation: SimulationConfig::from_env_profiled(p),
        }
    }

    /// Discover available profiles by scanning env vars for `{PREFIX}_{MARKER_KEY}` patterns.
    /// Always includes "default" (the unprefixed config).
    pub fn available_profiles() -> Vec<String> {
        let mut profiles = std::collections::BTreeSet::new();
        profiles.insert("default".to_string());

        for (key, _) in env::vars() {
            for marker in PROFILE_MARKER_KEYS {
                if let Some(prefix) = key.strip_suffix(&format!("_{}", marker)) {
                    if !prefix.is_empty()
                        && prefix.chars().all(|c| c.is_ascii_uppercase() || c == '_')
                    {
                        profiles.insert(prefix.to_string());
                    }
                }
            }
        }

        profiles.into_iter().collect()
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        let sim = &self.simulation;
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  simulation:  cycles={}, seed={}, tick_ms={}",
            sim.cycles,
            sim.seed.map(|s| s.to_string()).as_deref().unwrap_or("(entropy)"),
            sim.tick_ms
        );
        tracing::info!(
            "  telemetry:   timeline_export={}",
            sim.timeline_export
                .as_ref()
                .map(|p| p.display().to_string())
                .as_deref()
                .unwrap_or("(none)")
        );
        if let Some(load) = sim.fixed_load {
            tracing::info!("  monitor:     fixed_load={:.2}", load);
        }
    }
}

// ── Simulation run ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of scheduling cycles to run.
    pub cycles: u32,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Pause between cycles, in milliseconds. 0 = run flat out.
    pub tick_ms: u64,
    /// Where to write the JSON timeline after the run.
    pub timeline_export: Option<PathBuf>,
    /// Replace the sampled load with a constant in [0, 1].
    pub fixed_load: Option<f64>,
}

impl SimulationConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            cycles: profiled_env_u32(p, "SIM_CYCLES", 20),
            seed: profiled_env_opt(p, "SIM_SEED").and_then(|v| v.parse().ok()),
            tick_ms: profiled_env_u64(p, "SIM_TICK_MS", 0),
            timeline_export: profiled_env_opt(p, "SIM_TIMELINE_EXPORT").map(PathBuf::from),
            fixed_load: profiled_env_opt(p, "SIM_FIXED_LOAD")
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|l| (0.0..=1.0).contains(l)),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycles: 20,
            seed: None,
            tick_ms: 0,
            timeline_export: None,
            fixed_load: None,
        }
    }
}
