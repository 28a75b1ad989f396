//! Content sum type and batches
//!
//! The store persists every kind through one shape, so the provisioner can
//! treat a module as an ordered list of homogeneous batches.

use serde::{Deserialize, Serialize};

use super::{
    Ability, Chest, Creature, Faction, FactionRelation, Item, Location, LootTable, Pool, Trap,
};
use crate::domain::value_objects::{ContentId, ContentKind};

/// A reference from one entity to another by ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    /// Field holding the reference, for error messages
    pub field: &'static str,
    pub kind: ContentKind,
    pub id: ContentId,
}

impl EntityRef {
    pub fn new(field: &'static str, kind: ContentKind, id: &ContentId) -> Self {
        Self {
            field,
            kind,
            id: id.clone(),
        }
    }
}

/// Any seedable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ContentEntity {
    Ability(Ability),
    Item(Item),
    LootTable(LootTable),
    Creature(Creature),
    Location(Location),
    Chest(Chest),
    Pool(Pool),
    Trap(Trap),
    Faction(Faction),
    FactionRelation(FactionRelation),
}

impl ContentEntity {
    pub fn id(&self) -> &ContentId {
        match self {
            Self::Ability(e) => &e.id,
            Self::Item(e) => &e.id,
            Self::LootTable(e) => &e.id,
            Self::Creature(e) => &e.id,
            Self::Location(e) => &e.id,
            Self::Chest(e) => &e.id,
            Self::Pool(e) => &e.id,
            Self::Trap(e) => &e.id,
            Self::Faction(e) => &e.id,
            Self::FactionRelation(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Ability(_) => ContentKind::Ability,
            Self::Item(_) => ContentKind::Item,
            Self::LootTable(_) => ContentKind::LootTable,
            Self::Creature(_) => ContentKind::Creature,
            Self::Location(_) => ContentKind::Location,
            Self::Chest(_) => ContentKind::Chest,
            Self::Pool(_) => ContentKind::Pool,
            Self::Trap(_) => ContentKind::Trap,
            Self::Faction(_) => ContentKind::Faction,
            Self::FactionRelation(_) => ContentKind::FactionRelation,
        }
    }

    /// Display name, for logs
    pub fn name(&self) -> &str {
        match self {
            Self::Ability(e) => &e.name,
            Self::Item(e) => &e.name,
            Self::LootTable(e) => &e.name,
            Self::Creature(e) => &e.name,
            Self::Location(e) => &e.name,
            Self::Chest(e) => &e.name,
            Self::Pool(e) => &e.name,
            Self::Trap(e) => &e.name,
            Self::Faction(e) => &e.name,
            Self::FactionRelation(e) => e.id.as_str(),
        }
    }

    /// Every ID this entity points at
    pub fn references(&self) -> Vec<EntityRef> {
        match self {
            Self::Ability(_) | Self::Item(_) => Vec::new(),
            Self::LootTable(e) => e.references(),
            Self::Creature(e) => e.references(),
            Self::Location(e) => e.references(),
            Self::Chest(e) => e.references(),
            Self::Pool(e) => e.references(),
            Self::Trap(e) => e.references(),
            Self::Faction(e) => e.references(),
            Self::FactionRelation(e) => e.references(),
        }
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for ContentEntity {
                fn from(entity: $variant) -> Self {
                    Self::$variant(entity)
                }
            }
        )*
    };
}

impl_from_entity!(
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
);

/// A named, ordered list of entities of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBatch {
    pub name: String,
    pub kind: ContentKind,
    pub entities: Vec<ContentEntity>,
}

impl ContentBatch {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            name: kind.plural().to_string(),
            kind,
            entities: Vec::new(),
        }
    }

    /// Append an entity; entities of another kind are rejected
    pub fn push(&mut self, entity: impl Into<ContentEntity>) -> Result<(), ContentEntity> {
        let entity = entity.into();
        if entity.kind() != self.kind {
            return Err(entity);
        }
        self.entities.push(entity);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}
