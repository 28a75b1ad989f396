//! Module builder - The registration DSL used by content modules
//!
//! Each method takes a short suffix and a configuration closure, composes
//! the deterministic ID `<kind>-<moduleId>-<suffix>`, applies the closure
//! to a defaulted entity, records it in the batch for its kind, and returns
//! the finished entity so later definitions can reference its ID.
//!
//! ```ignore
//! let bite = builder.ability("bite", |a| a.damage_dice = Some("1d3".into()));
//! let rat = builder.creature("giant-rat", |c| {
//!     c.challenge_rating = ChallengeRating::new(0.125);
//!     c.ability_ids.push(bite.id.clone());
//! });
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::domain::entities::{
    Ability, Chest, ContentBatch, ContentEntity, Creature, Disposition, EncounterEntry,
    EncounterTable, Faction, FactionRelation, Item, ItemType, Location, LocationType, LootTable,
    Pool, Trap,
};
use crate::domain::errors::ContentError;
use crate::domain::value_objects::{ContentId, ContentKind, EncounterContext, ModuleId};

/// Everything a module declared, ready for provisioning and registration
#[derive(Debug, Clone)]
pub struct ModuleDefinition {
    pub module_id: ModuleId,
    /// Non-empty batches in seeding order
    pub batches: Vec<ContentBatch>,
    pub encounter_tables: Vec<EncounterTable>,
}

impl ModuleDefinition {
    /// Loot tables declared by this module
    pub fn loot_tables(&self) -> impl Iterator<Item = &LootTable> {
        self.batches
            .iter()
            .flat_map(|batch| batch.entities.iter())
            .filter_map(|entity| match entity {
                ContentEntity::LootTable(table) => Some(table),
                _ => None,
            })
    }

    pub fn entity_count(&self) -> usize {
        self.batches.iter().map(ContentBatch::len).sum()
    }
}

pub struct ModuleBuilder {
    module_id: ModuleId,
    batches: BTreeMap<ContentKind, ContentBatch>,
    encounter_tables: Vec<(EncounterContext, Vec<EncounterEntry>)>,
}

impl ModuleBuilder {
    pub fn new(module_id: impl Into<ModuleId>) -> Self {
        Self {
            module_id: module_id.into(),
            batches: BTreeMap::new(),
            encounter_tables: Vec::new(),
        }
    }

    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    /// Compose an ID in this module without declaring anything
    ///
    /// Useful for forward references between sibling locations.
    pub fn id(&self, kind: ContentKind, suffix: &str) -> ContentId {
        ContentId::compose(kind, &self.module_id, suffix)
    }

    pub fn ability(&mut self, suffix: &str, configure: impl FnOnce(&mut Ability)) -> Ability {
        let mut ability = Ability::new(self.id(ContentKind::Ability, suffix), title_case(suffix));
        configure(&mut ability);
        self.record(ability)
    }

    pub fn item(
        &mut self,
        suffix: &str,
        item_type: ItemType,
        configure: impl FnOnce(&mut Item),
    ) -> Item {
        let mut item = Item::new(self.id(ContentKind::Item, suffix), title_case(suffix), item_type);
        configure(&mut item);
        self.record(item)
    }

    pub fn loot_table(
        &mut self,
        suffix: &str,
        configure: impl FnOnce(&mut LootTable),
    ) -> LootTable {
        let mut table = LootTable::new(self.id(ContentKind::LootTable, suffix), title_case(suffix));
        configure(&mut table);
        self.record(table)
    }

    pub fn creature(&mut self, suffix: &str, configure: impl FnOnce(&mut Creature)) -> Creature {
        let mut creature =
            Creature::new(self.id(ContentKind::Creature, suffix), title_case(suffix));
        configure(&mut creature);
        self.record(creature)
    }

    pub fn location(
        &mut self,
        suffix: &str,
        location_type: LocationType,
        configure: impl FnOnce(&mut Location),
    ) -> Location {
        let mut location = Location::new(
            self.id(ContentKind::Location, suffix),
            title_case(suffix),
            location_type,
        );
        configure(&mut location);
        self.record(location)
    }

    pub fn chest(
        &mut self,
        suffix: &str,
        location_id: &ContentId,
        configure: impl FnOnce(&mut Chest),
    ) -> Chest {
        let mut chest = Chest::new(
            self.id(ContentKind::Chest, suffix),
            location_id.clone(),
            title_case(suffix),
        );
        configure(&mut chest);
        self.record(chest)
    }

    pub fn pool(
        &mut self,
        suffix: &str,
        location_id: &ContentId,
        configure: impl FnOnce(&mut Pool),
    ) -> Pool {
        let mut pool = Pool::new(
            self.id(ContentKind::Pool, suffix),
            location_id.clone(),
            title_case(suffix),
        );
        configure(&mut pool);
        self.record(pool)
    }

    pub fn trap(
        &mut self,
        suffix: &str,
        location_id: &ContentId,
        configure: impl FnOnce(&mut Trap),
    ) -> Trap {
        let mut trap = Trap::new(
            self.id(ContentKind::Trap, suffix),
            location_id.clone(),
            title_case(suffix),
        );
        configure(&mut trap);
        self.record(trap)
    }

    pub fn faction(&mut self, suffix: &str, configure: impl FnOnce(&mut Faction)) -> Faction {
        let mut faction = Faction::new(self.id(ContentKind::Faction, suffix), title_case(suffix));
        configure(&mut faction);
        self.record(faction)
    }

    /// Directed relation; the suffix is derived from both faction IDs
    pub fn faction_relation(
        &mut self,
        faction: &Faction,
        other: &Faction,
        disposition: Disposition,
    ) -> FactionRelation {
        let suffix = format!(
            "{}-{}",
            local_suffix(&faction.id, &self.module_id),
            local_suffix(&other.id, &self.module_id)
        );
        let relation = FactionRelation::new(
            self.id(ContentKind::FactionRelation, &suffix),
            faction.id.clone(),
            other.id.clone(),
            disposition,
        );
        self.record(relation)
    }

    /// Declare a wandering-encounter table for a biome or reserved key
    pub fn encounter_table(
        &mut self,
        context: impl Into<EncounterContext>,
        entries: Vec<EncounterEntry>,
    ) {
        self.encounter_tables.push((context.into(), entries));
    }

    /// Finish the module, checking for duplicate IDs and invalid tables
    pub fn build(self) -> Result<ModuleDefinition, ContentError> {
        let mut seen = HashSet::new();
        for batch in self.batches.values() {
            for entity in &batch.entities {
                if !seen.insert((entity.kind(), entity.id().clone())) {
                    return Err(ContentError::DuplicateId {
                        module: self.module_id.clone(),
                        kind: entity.kind(),
                        id: entity.id().clone(),
                    });
                }
            }
        }

        let encounter_tables = self
            .encounter_tables
            .into_iter()
            .map(|(context, entries)| EncounterTable::new(context, entries))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ModuleDefinition {
            module_id: self.module_id,
            batches: self.batches.into_values().collect(),
            encounter_tables,
        })
    }

    fn record<E>(&mut self, entity: E) -> E
    where
        E: Clone + Into<ContentEntity>,
    {
        let content: ContentEntity = entity.clone().into();
        let kind = content.kind();
        self.batches
            .entry(kind)
            .or_insert_with(|| ContentBatch::new(kind))
            .entities
            .push(content);
        entity
    }
}

/// `giant-rat` -> `Giant Rat`
fn title_case(suffix: &str) -> String {
    suffix
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip `<kind>-<module>-` from an ID composed in this module
fn local_suffix<'a>(id: &'a ContentId, module: &ModuleId) -> &'a str {
    let marker = format!("-{}-", module.as_str());
    match id.as_str().find(&marker) {
        Some(pos) => &id.as_str()[pos + marker.len()..],
        None => id.as_str(),
    }
}
