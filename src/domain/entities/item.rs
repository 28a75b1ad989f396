//! Item entity - Anything that can be carried, dropped or looted

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContentId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    pub item_type: ItemType,
    /// Base value in gold pieces
    pub value: u32,
    /// Weight in pounds
    pub weight: f32,
    /// Whether several of this item share one inventory slot
    pub stackable: bool,
}

impl Item {
    pub fn new(id: ContentId, name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            item_type,
            value: 0,
            weight: 0.0,
            stackable: item_type.stacks_by_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    Currency,
    Material,
    Key,
    #[default]
    Miscellaneous,
}

impl ItemType {
    fn stacks_by_default(&self) -> bool {
        matches!(self, Self::Consumable | Self::Currency | Self::Material)
    }
}
