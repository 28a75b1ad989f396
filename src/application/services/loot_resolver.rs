//! Loot resolver - Turns registered loot tables into concrete drops
//!
//! Tables are validated once at registration and then only read. Each
//! entry rolls independently: one uniform draw against `chance`, and on a
//! hit one inclusive draw for the quantity.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, instrument, warn};

use crate::application::ports::outbound::RandomPort;
use crate::domain::entities::{Chest, Creature, LootEntry, LootTable};
use crate::domain::errors::ContentError;
use crate::domain::value_objects::ContentId;

/// One resolved drop
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LootDrop {
    pub item_id: ContentId,
    pub quantity: u32,
}

impl LootDrop {
    pub fn new(item_id: impl Into<ContentId>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// Roll every entry of `table` once
///
/// An empty table yields no drops. Never fails for a validated table.
pub fn roll_loot(table: &LootTable, rng: &dyn RandomPort) -> Vec<LootDrop> {
    table
        .entries
        .iter()
        .filter_map(|entry| roll_entry(entry, rng))
        .collect()
}

fn roll_entry(entry: &LootEntry, rng: &dyn RandomPort) -> Option<LootDrop> {
    if rng.random_f64() >= entry.chance {
        return None;
    }
    let quantity = if entry.min_qty == entry.max_qty {
        entry.min_qty
    } else {
        rng.random_range(entry.min_qty, entry.max_qty)
    };
    Some(LootDrop {
        item_id: entry.item_id.clone(),
        quantity,
    })
}

/// Registry of loot tables keyed by table ID
///
/// Registration replaces the whole `Arc` for a key, so a concurrent
/// `resolve` sees either the old table or the new one.
#[derive(Default)]
pub struct LootResolver {
    tables: DashMap<ContentId, Arc<LootTable>>,
}

impl LootResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a table, replacing any table with the same ID
    pub fn register(&self, table: LootTable) -> Result<(), ContentError> {
        let dead = table.validate()?;
        for item_id in &dead {
            warn!(
                table_id = %table.id,
                item_id = %item_id,
                "Loot entry has zero drop chance and will never drop"
            );
        }
        if table.entries.is_empty() {
            warn!(table_id = %table.id, "Registered empty loot table; it never drops anything");
        }

        let table_id = table.id.clone();
        if self.tables.insert(table_id.clone(), Arc::new(table)).is_some() {
            debug!(table_id = %table_id, "Replaced previously registered loot table");
        }
        Ok(())
    }

    pub fn register_all<I>(&self, tables: I) -> Result<usize, ContentError>
    where
        I: IntoIterator<Item = LootTable>,
    {
        let mut count = 0;
        for table in tables {
            self.register(table)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn table(&self, table_id: &ContentId) -> Option<Arc<LootTable>> {
        self.tables.get(table_id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Resolve a registered table into drops
    #[instrument(skip(self, rng), fields(table_id = %table_id))]
    pub fn resolve(
        &self,
        table_id: &ContentId,
        rng: &dyn RandomPort,
    ) -> Result<Vec<LootDrop>, ContentError> {
        let table = self
            .table(table_id)
            .ok_or_else(|| ContentError::UnknownLootTable(table_id.clone()))?;
        let drops = roll_loot(&table, rng);
        debug!(drops = drops.len(), "Resolved loot table");
        Ok(drops)
    }

    /// Drops for a slain creature; creatures without a table drop nothing
    pub fn drops_for_creature(
        &self,
        creature: &Creature,
        rng: &dyn RandomPort,
    ) -> Result<Vec<LootDrop>, ContentError> {
        match creature.loot_table_id {
            Some(ref table_id) => self.resolve(table_id, rng),
            None => Ok(Vec::new()),
        }
    }

    /// Contents of a chest when it is opened
    pub fn contents_of_chest(
        &self,
        chest: &Chest,
        rng: &dyn RandomPort,
    ) -> Result<Vec<LootDrop>, ContentError> {
        match chest.loot_table_id {
            Some(ref table_id) => self.resolve(table_id, rng),
            None => Ok(Vec::new()),
        }
    }
}
