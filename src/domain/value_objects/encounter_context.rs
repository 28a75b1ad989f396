//! Encounter context keys - biomes plus the reserved INDOOR/GENERIC keys

use serde::{Deserialize, Serialize};

/// Terrain classification used to key wandering-encounter tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Biome {
    Forest,
    Plains,
    Hills,
    Mountains,
    Swamp,
    Desert,
    Coast,
    Underdark,
}

impl Biome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forest => "FOREST",
            Self::Plains => "PLAINS",
            Self::Hills => "HILLS",
            Self::Mountains => "MOUNTAINS",
            Self::Swamp => "SWAMP",
            Self::Desert => "DESERT",
            Self::Coast => "COAST",
            Self::Underdark => "UNDERDARK",
        }
    }
}

/// Lookup key for an encounter table
///
/// Keys are normalized to upper case so `"forest"` and `"FOREST"` address
/// the same table. Any biome name is accepted; unregistered names fall back
/// to [`EncounterContext::generic`] at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncounterContext(String);

impl EncounterContext {
    pub const INDOOR_KEY: &'static str = "INDOOR";
    pub const GENERIC_KEY: &'static str = "GENERIC";

    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_uppercase())
    }

    pub fn indoor() -> Self {
        Self(Self::INDOOR_KEY.to_string())
    }

    pub fn generic() -> Self {
        Self(Self::GENERIC_KEY.to_string())
    }

    pub fn is_generic(&self) -> bool {
        self.0 == Self::GENERIC_KEY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Biome> for EncounterContext {
    fn from(biome: Biome) -> Self {
        Self(biome.as_str().to_string())
    }
}

impl From<&str> for EncounterContext {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl std::fmt::Display for EncounterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
