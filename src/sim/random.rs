//! Injectable randomness for spawning and obstacle geometry
//!
//! The simulation only ever asks for uniform samples in `[0, 1)`, so a
//! test can script exact draws while a real run uses a seeded PCG stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform samples
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn unit(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        let value = lo + self.unit() * (hi - lo);
        if value < hi {
            value
        } else {
            // Rounding at the top of the range can land on `hi` itself
            lo.max(hi - hi.abs().max(1.0) * f32::EPSILON)
        }
    }

    /// Uniform integer in `0..n` (`n` must be non-zero)
    fn pick(&mut self, n: u32) -> u32 {
        ((self.unit() * n as f32) as u32).min(n - 1)
    }
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded default generator
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of draws, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(values: &[f32]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far
    pub(crate) fn draws(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
