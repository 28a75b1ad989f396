//! Chests, pools and traps - Fixtures placed inside locations

use serde::{Deserialize, Serialize};

use super::EntityRef;
use crate::domain::value_objects::{ContentId, ContentKind};

/// A container whose contents are rolled from a loot table when opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub id: ContentId,
    pub location_id: ContentId,
    pub name: String,
    pub loot_table_id: Option<ContentId>,
    pub locked: bool,
    /// DC to pick the lock, when locked
    pub lock_difficulty: Option<u32>,
}

impl Chest {
    pub fn new(id: ContentId, location_id: ContentId, name: impl Into<String>) -> Self {
        Self {
            id,
            location_id,
            name: name.into(),
            loot_table_id: None,
            locked: false,
            lock_difficulty: None,
        }
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        let mut refs = vec![EntityRef::new(
            "location_id",
            ContentKind::Location,
            &self.location_id,
        )];
        if let Some(ref table) = self.loot_table_id {
            refs.push(EntityRef::new("loot_table_id", ContentKind::LootTable, table));
        }
        refs
    }
}

/// A magical pool with an effect on whoever drinks or touches it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: ContentId,
    pub location_id: ContentId,
    pub name: String,
    pub description: String,
    pub effect: PoolEffect,
}

impl Pool {
    pub fn new(id: ContentId, location_id: ContentId, name: impl Into<String>) -> Self {
        Self {
            id,
            location_id,
            name: name.into(),
            description: String::new(),
            effect: PoolEffect::None,
        }
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        vec![EntityRef::new("location_id", ContentKind::Location, &self.location_id)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoolEffect {
    #[default]
    None,
    Heal { dice: String },
    Damage { dice: String },
    Poison { save_difficulty: u32 },
    Custom(String),
}

/// A hidden hazard that triggers when a location is searched carelessly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub id: ContentId,
    pub location_id: ContentId,
    pub name: String,
    pub detect_difficulty: u32,
    pub disarm_difficulty: u32,
    pub damage_dice: Option<String>,
}

impl Trap {
    pub fn new(id: ContentId, location_id: ContentId, name: impl Into<String>) -> Self {
        Self {
            id,
            location_id,
            name: name.into(),
            detect_difficulty: 10,
            disarm_difficulty: 10,
            damage_dice: None,
        }
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        vec![EntityRef::new("location_id", ContentKind::Location, &self.location_id)]
    }
}
