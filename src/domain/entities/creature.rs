//! Creature entity - Monsters and NPC stat blocks

use serde::{Deserialize, Serialize};

use super::EntityRef;
use crate::domain::value_objects::{ChallengeRating, ContentId, ContentKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    pub challenge_rating: ChallengeRating,
    pub hit_points: u32,
    pub armor_class: u32,
    /// Whether the creature attacks on sight
    pub hostile: bool,
    pub ability_ids: Vec<ContentId>,
    /// Table rolled when the creature is killed
    pub loot_table_id: Option<ContentId>,
}

impl Creature {
    pub fn new(id: ContentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            challenge_rating: ChallengeRating::ZERO,
            hit_points: 1,
            armor_class: 10,
            hostile: true,
            ability_ids: Vec::new(),
            loot_table_id: None,
        }
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        let mut refs: Vec<EntityRef> = self
            .ability_ids
            .iter()
            .map(|id| EntityRef::new("ability_ids", ContentKind::Ability, id))
            .collect();
        if let Some(ref table) = self.loot_table_id {
            refs.push(EntityRef::new("loot_table_id", ContentKind::LootTable, table));
        }
        refs
    }
}
