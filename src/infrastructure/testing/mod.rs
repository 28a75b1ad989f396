//! Deterministic `RandomPort` doubles for tests and scripted demos

mod fixed_random;

pub use fixed_random::{FixedRandom, SequenceRandom};
