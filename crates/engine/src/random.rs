//! Injectable randomness.
//!
//! Load sampling, slice sizing and task arrivals all draw from a
//! [`RandomSource`] owned by the caller, so runs are reproducible from a
//! seed and tests can script every draw.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the uniform draws the scheduler needs.
pub trait RandomSource: Send {
    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[low, high]`. Returns `low` when `high <= low`.
    fn next_in_range(&mut self, low: u64, high: u64) -> u64;
}

/// `StdRng`-backed source. Seeded for reproducible runs, or from OS entropy.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Always returns the same draws. Integers are clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    pub unit: f64,
    pub int: u64,
}

impl FixedRandom {
    pub fn new(unit: f64, int: u64) -> Self {
        Self { unit, int }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.unit
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        self.int.clamp(low, high.max(low))
    }
}

/// Replays scripted draws in order, wrapping around when a script runs out.
///
/// An empty script yields `0.0` / `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    ints: VecDeque<u64>,
}

impl ScriptedRandom {
    pub fn new(units: impl IntoIterator<Item = f64>, ints: impl IntoIterator<Item = u64>) -> Self {
        Self {
            units: units.into_iter().collect(),
            ints: ints.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        match self.units.pop_front() {
            Some(u) => {
                self.units.push_back(u);
                u
            }
            None => 0.0,
        }
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        match self.ints.pop_front() {
            Some(v) => {
                self.ints.push_back(v);
                v.clamp(low, high.max(low))
            }
            None => low,
        }
    }
}
