//! Faction entities - Groups of creatures and their standing with each other

use serde::{Deserialize, Serialize};

use super::EntityRef;
use crate::domain::value_objects::{ContentId, ContentKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    /// Lair or stronghold of the faction
    pub home_location_id: Option<ContentId>,
    /// Creatures that belong to the faction
    pub member_ids: Vec<ContentId>,
}

impl Faction {
    pub fn new(id: ContentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            home_location_id: None,
            member_ids: Vec::new(),
        }
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        let mut refs: Vec<EntityRef> = self
            .member_ids
            .iter()
            .map(|id| EntityRef::new("member_ids", ContentKind::Creature, id))
            .collect();
        if let Some(ref home) = self.home_location_id {
            refs.push(EntityRef::new("home_location_id", ContentKind::Location, home));
        }
        refs
    }
}

/// Directed standing of one faction toward another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionRelation {
    pub id: ContentId,
    pub faction_id: ContentId,
    pub other_faction_id: ContentId,
    pub disposition: Disposition,
}

impl FactionRelation {
    pub fn new(
        id: ContentId,
        faction_id: ContentId,
        other_faction_id: ContentId,
        disposition: Disposition,
    ) -> Self {
        Self {
            id,
            faction_id,
            other_faction_id,
            disposition,
        }
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        vec![
            EntityRef::new("faction_id", ContentKind::Faction, &self.faction_id),
            EntityRef::new("other_faction_id", ContentKind::Faction, &self.other_faction_id),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Disposition {
    Hostile,
    Unfriendly,
    #[default]
    Neutral,
    Friendly,
    Allied,
}
