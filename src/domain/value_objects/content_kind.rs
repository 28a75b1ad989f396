//! Content kinds and their seeding order

use serde::{Deserialize, Serialize};

/// The kind of a piece of seeded content
///
/// Variants are declared in dependency order: a batch of a later kind may
/// reference IDs produced by any earlier kind, so `Ord` doubles as the
/// seeding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Ability,
    Item,
    LootTable,
    Creature,
    Location,
    Chest,
    Pool,
    Trap,
    Faction,
    FactionRelation,
}

impl ContentKind {
    /// All kinds in the order batches are applied
    pub const SEED_ORDER: [ContentKind; 10] = [
        ContentKind::Ability,
        ContentKind::Item,
        ContentKind::LootTable,
        ContentKind::Creature,
        ContentKind::Location,
        ContentKind::Chest,
        ContentKind::Pool,
        ContentKind::Trap,
        ContentKind::Faction,
        ContentKind::FactionRelation,
    ];

    /// Prefix used when composing IDs of this kind
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Ability => "ability",
            Self::Item => "item",
            Self::LootTable => "loot",
            Self::Creature => "creature",
            Self::Location => "location",
            Self::Chest => "chest",
            Self::Pool => "pool",
            Self::Trap => "trap",
            Self::Faction => "faction",
            Self::FactionRelation => "relation",
        }
    }

    /// Storage key for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ability => "ability",
            Self::Item => "item",
            Self::LootTable => "loot_table",
            Self::Creature => "creature",
            Self::Location => "location",
            Self::Chest => "chest",
            Self::Pool => "pool",
            Self::Trap => "trap",
            Self::Faction => "faction",
            Self::FactionRelation => "faction_relation",
        }
    }

    /// Plural label used in log summaries
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Ability => "abilities",
            Self::Item => "items",
            Self::LootTable => "loot tables",
            Self::Creature => "creatures",
            Self::Location => "locations",
            Self::Chest => "chests",
            Self::Pool => "pools",
            Self::Trap => "traps",
            Self::Faction => "factions",
            Self::FactionRelation => "faction relations",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SEED_ORDER
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown content kind: {}", s))
    }
}
