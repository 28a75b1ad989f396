//! Ability entity - Special attacks and powers creatures can use

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContentId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: ContentId,
    pub name: String,
    pub description: String,
    /// Damage expression such as `1d6+1`
    pub damage_dice: Option<String>,
    /// Rounds before the ability can be used again (0 = at will)
    pub cooldown_rounds: u32,
}

impl Ability {
    pub fn new(id: ContentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            damage_dice: None,
            cooldown_rounds: 0,
        }
    }
}
