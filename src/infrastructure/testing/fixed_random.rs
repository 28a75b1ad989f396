//! Deterministic random sources for tests

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::outbound::RandomPort;

/// Returns the same float and integer on every draw
///
/// The integer is clamped into the requested range, so a single double can
/// serve tables with different quantity bounds.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    value: f64,
    range_value: u32,
}

impl FixedRandom {
    pub fn new(value: f64, range_value: u32) -> Self {
        Self { value, range_value }
    }
}

impl RandomPort for FixedRandom {
    fn random_f64(&self) -> f64 {
        self.value
    }

    fn random_range(&self, min: u32, max: u32) -> u32 {
        self.range_value.clamp(min, max)
    }
}

/// Cycles through scripted floats and integers independently
#[derive(Debug)]
pub struct SequenceRandom {
    floats: Vec<f64>,
    ranges: Vec<u32>,
    float_index: AtomicUsize,
    range_index: AtomicUsize,
}

impl SequenceRandom {
    /// Empty sequences fall back to 0.0 and the lower bound
    pub fn new(floats: Vec<f64>, ranges: Vec<u32>) -> Self {
        Self {
            floats,
            ranges,
            float_index: AtomicUsize::new(0),
            range_index: AtomicUsize::new(0),
        }
    }
}

fn next<T: Copy>(values: &[T], index: &AtomicUsize) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let i = index.fetch_add(1, Ordering::Relaxed);
    Some(values[i % values.len()])
}

impl RandomPort for SequenceRandom {
    fn random_f64(&self) -> f64 {
        next(&self.floats, &self.float_index).unwrap_or(0.0)
    }

    fn random_range(&self, min: u32, max: u32) -> u32 {
        next(&self.ranges, &self.range_index)
            .map(|v| v.clamp(min, max))
            .unwrap_or(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_random_clamps_into_range() {
        let rng = FixedRandom::new(0.25, 10);
        assert_eq!(rng.random_f64(), 0.25);
        assert_eq!(rng.random_range(1, 4), 4);
        assert_eq!(rng.random_range(12, 20), 12);
        assert_eq!(rng.random_range(0, 100), 10);
    }

    #[test]
    fn test_sequence_cycles() {
        let rng = SequenceRandom::new(vec![0.1, 0.9], vec![1, 2, 3]);

        let floats: Vec<_> = (0..3).map(|_| rng.random_f64()).collect();
        let ranges: Vec<_> = (0..4).map(|_| rng.random_range(0, 10)).collect();

        assert_eq!(floats, vec![0.1, 0.9, 0.1]);
        assert_eq!(ranges, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_empty_sequence_defaults() {
        let rng = SequenceRandom::new(vec![], vec![]);
        assert_eq!(rng.random_f64(), 0.0);
        assert_eq!(rng.random_range(3, 9), 3);
    }
}
