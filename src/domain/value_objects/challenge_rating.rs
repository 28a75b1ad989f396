//! Challenge rating value object

use serde::{Deserialize, Serialize};

/// Numeric difficulty of a creature or an encounter entry
///
/// Fractional ratings (1/8, 1/4, 1/2) display as fractions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeRating(f32);

impl ChallengeRating {
    pub const ZERO: ChallengeRating = ChallengeRating(0.0);

    pub fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// True when this rating lies in the inclusive range `[min, max]`
    pub fn within(&self, min: ChallengeRating, max: ChallengeRating) -> bool {
        self.0 >= min.0 && self.0 <= max.0
    }
}

impl From<f32> for ChallengeRating {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl From<u32> for ChallengeRating {
    fn from(value: u32) -> Self {
        Self(value as f32)
    }
}

impl std::fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            v if v == 0.125 => f.write_str("1/8"),
            v if v == 0.25 => f.write_str("1/4"),
            v if v == 0.5 => f.write_str("1/2"),
            v => write!(f, "{}", v),
        }
    }
}
