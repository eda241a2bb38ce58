//! Test RNG — deterministic `NoiseRng` implementations for tests.

use inquest_core::rng::NoiseRng;

/// An RNG that always draws 0.5, which the stress model maps to zero noise.
/// Suitable for tests that assert exact stress arithmetic.
#[derive(Debug)]
pub struct MidpointRng;

impl NoiseRng for MidpointRng {
    fn next_f64(&mut self) -> f64 {
        0.5
    }
}

/// An RNG that returns draws from a predetermined sequence, then falls back
/// to 0.5 once the sequence is exhausted. Used in tests that need specific,
/// repeatable noise outcomes.
#[derive(Debug)]
pub struct SequenceNoiseRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceNoiseRng {
    /// Create a new `SequenceNoiseRng` with the given draws.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

impl NoiseRng for SequenceNoiseRng {
    fn next_f64(&mut self) -> f64 {
        let val = self.values.get(self.index).copied().unwrap_or(0.5);
        self.index += 1;
        val
    }
}
