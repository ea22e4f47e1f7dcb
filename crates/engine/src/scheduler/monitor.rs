use crate::random::RandomSource;

/// Lowest load the random monitor reports.
pub const LOAD_FLOOR: f64 = 0.6;
/// Width of the random monitor's range; samples land in `[0.6, 1.0)`.
pub const LOAD_SPAN: f64 = 0.4;
/// Largest load the random monitor reports: the last f64 below 1.0.
pub const LOAD_CEILING: f64 = 1.0 - f64::EPSILON / 2.0;

/// Produces one load estimate in `[0, 1]` per scheduling cycle.
pub trait WorkloadMonitor: Send {
    fn name(&self) -> &str;

    /// Sample the current load. Called exactly once per cycle.
    fn sample(&mut self, rng: &mut dyn RandomSource) -> f64;
}

/// Models a system that is always moderately to heavily loaded.
///
/// Each sample is independent: no smoothing between cycles.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomLoadMonitor;

impl WorkloadMonitor for RandomLoadMonitor {
    fn name(&self) -> &str {
        "random"
    }

    fn sample(&mut self, rng: &mut dyn RandomSource) -> f64 {
        // a unit draw just below 1.0 rounds up to 1.0 after scaling
        (LOAD_FLOOR + rng.next_unit() * LOAD_SPAN).min(LOAD_CEILING)
    }
}

/// Reports the same load every cycle.
#[derive(Debug, Clone, Copy)]
pub struct FixedLoadMonitor {
    load: f64,
}

impl FixedLoadMonitor {
    /// Build a monitor for `load`, clamped into `[0, 1]`. NaN reads as 0.
    pub fn new(load: f64) -> Self {
        let load = if load.is_nan() { 0.0 } else { load.clamp(0.0, 1.0) };
        Self { load }
    }
}

impl WorkloadMonitor for FixedLoadMonitor {
    fn name(&self) -> &str {
        "fixed"
    }

    fn sample(&mut self, _rng: &mut dyn RandomSource) -> f64 {
        self.load
    }
}
