//! Location entity - Rooms, caves and wilderness areas of a module

use serde::{Deserialize, Serialize};

use super::EntityRef;
use crate::domain::value_objects::{Biome, ContentId, ContentKind, EncounterContext};

/// A location in an adventure module
///
/// Exits may point at sibling locations of the same module, so a location
/// batch is allowed to reference itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    pub location_type: LocationType,
    /// Biome used for wandering encounters outdoors
    pub biome: Option<Biome>,
    /// Creatures placed here at seed time
    pub creature_ids: Vec<ContentId>,
    pub exits: Vec<LocationExit>,
    /// Chance per rest or turn of a wandering encounter
    pub encounter_chance: f64,
}

impl Location {
    pub fn new(id: ContentId, name: impl Into<String>, location_type: LocationType) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            location_type,
            biome: None,
            creature_ids: Vec::new(),
            exits: Vec::new(),
            encounter_chance: 0.0,
        }
    }

    pub fn with_exit(mut self, direction: Direction, target_id: ContentId) -> Self {
        self.exits.push(LocationExit::new(direction, target_id));
        self
    }

    /// Context key for wandering-encounter tables at this location
    ///
    /// Interiors always roll on the INDOOR table; exteriors without a biome
    /// roll on GENERIC.
    pub fn encounter_context(&self) -> EncounterContext {
        match (self.location_type, self.biome) {
            (LocationType::Interior, _) => EncounterContext::indoor(),
            (LocationType::Exterior, Some(biome)) => biome.into(),
            (LocationType::Exterior, None) => EncounterContext::generic(),
        }
    }

    pub(crate) fn references(&self) -> Vec<EntityRef> {
        self.creature_ids
            .iter()
            .map(|id| EntityRef::new("creature_ids", ContentKind::Creature, id))
            .chain(self.exits.iter().map(|exit| {
                EntityRef::new("exits.target_id", ContentKind::Location, &exit.target_id)
            }))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    /// Caves, rooms, dungeons
    Interior,
    /// Wilderness, roads, courtyards
    Exterior,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationExit {
    pub direction: Direction,
    pub target_id: ContentId,
    /// Hidden exits must be found before they can be used
    pub hidden: bool,
}

impl LocationExit {
    pub fn new(direction: Direction, target_id: ContentId) -> Self {
        Self {
            direction,
            target_id,
            hidden: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}
