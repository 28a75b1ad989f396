//! Loot table entity - Independently rolled item drops
//!
//! Every entry is its own Bernoulli trial. A table with two entries at
//! `chance = 1.0` always drops both; entries are never mutually exclusive
//! slots of a single weighted pick.

use serde::{Deserialize, Serialize};

use super::EntityRef;
use crate::domain::errors::ContentError;
use crate::domain::value_objects::{ContentId, ContentKind};

/// One possible drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item_id: ContentId,
    /// Probability in `0.0..=1.0` that this entry drops
    pub chance: f64,
    pub min_qty: u32,
    pub max_qty: u32,
}

impl LootEntry {
    pub fn new(item_id: ContentId, chance: f64, min_qty: u32, max_qty: u32) -> Self {
        Self {
            item_id,
            chance,
            min_qty,
            max_qty,
        }
    }

    /// An entry that always drops exactly `qty`
    pub fn guaranteed(item_id: ContentId, qty: u32) -> Self {
        Self::new(item_id, 1.0, qty, qty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub id: ContentId,
    pub name: String,
    pub entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new(id: ContentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: LootEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Check chances and quantity ranges
    ///
    /// Returns the item IDs of entries with `chance = 0`. Those can never
    /// drop and are dead data, but they are not an error.
    pub fn validate(&self) -> Result<Vec<ContentId>, ContentError> {
        let mut dead = Vec::new();
        for entry in &self.entries {
            if !(0.0..=1.0).contains(&entry.chance) {
                return Err(ContentError::InvalidChance {
                    table: self.id.clone(),
                    item: entry.item_id.clone(),
                    chance: entry.chance,
                });
            }
            if entry.max_qty < entry.min_qty {
                return Err(ContentError::invalid_range(
                    format!("{} entry {}", self.id, entry.item_id),
                    "quantity",
                    entry.min_qty,
                    entry.max_qty,
                ));
            }
            if entry.chance == 0.0 {
                dead.push(entry.item_id.clone());
            }
        }
        Ok(dead)
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        self.entries
            .iter()
            .map(|entry| EntityRef::new("entries.item_id", ContentKind::Item, &entry.item_id))
            .collect()
    }
}
