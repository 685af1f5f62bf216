//! Random sources for scene setup and collision colors
//!
//! The simulation never touches a global RNG. Every random draw goes through
//! a [`RandomSource`] owned by the simulator, so a seeded or scripted source
//! makes whole runs reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Inclusive uniform integer draws
pub trait RandomSource {
    /// Draw an integer in `low..=high`. Returns `low` when the range is empty.
    fn uniform_int(&mut self, low: i32, high: i32) -> i32;
}

/// PCG-backed source seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: Pcg32,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed list of values in order, wrapping around at the end
///
/// Each value is clamped into the requested range, so one script can feed
/// both velocity draws and color draws.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<i32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            cursor: 0,
        }
    }

    /// Source that answers every draw with the same value
    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws made so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn uniform_int(&mut self, low: i32, high: i32) -> i32 {
        if self.values.is_empty() || low >= high {
            return low;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(low, high)
    }
}
