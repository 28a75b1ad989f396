//! Random port - Injectable source of uniform randomness
//!
//! Resolvers take a `&dyn RandomPort` per call instead of reaching for a
//! global generator, so tests can substitute a seeded or scripted source.

/// Uniform random generator
///
/// Implementations shared between threads must synchronize internally.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform float in `[0.0, 1.0)`
    fn random_f64(&self) -> f64;

    /// Uniform integer in `[min, max]`, both inclusive
    fn random_range(&self, min: u32, max: u32) -> u32;
}
