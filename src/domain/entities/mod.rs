//! Domain entities - Seedable content with stable, composed IDs

mod ability;
mod content;
mod creature;
mod encounter;
mod faction;
mod fixtures;
mod item;
mod location;
mod loot_table;

pub use ability::Ability;
pub use content::{ContentBatch, ContentEntity, EntityRef};
pub use creature::Creature;
pub use encounter::{EncounterEntry, EncounterTable};
pub use faction::{Disposition, Faction, FactionRelation};
pub use fixtures::{Chest, Pool, PoolEffect, Trap};
pub use item::{Item, ItemType};
pub use location::{Direction, Location, LocationExit, LocationType};
pub use loot_table::{LootEntry, LootTable};
