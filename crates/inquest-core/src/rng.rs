//! Random number generator abstraction.
//!
//! The stress model draws uniform noise through this trait. In production it
//! wraps the thread-local RNG; tests inject a scripted implementation so
//! stress values are exactly reproducible.

/// Abstraction over random number generation.
pub trait NoiseRng: Send {
    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by the `rand` thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdNoiseRng;

impl NoiseRng for StdNoiseRng {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng;
        rand::rng().random()
    }
}
