//! Configuration errors raised while provisioning or registering content
//!
//! Every variant is an authoring mistake. They are raised at startup so the
//! service refuses to run content-incomplete; `resolve`/`select` never
//! produce them for tables that passed registration.

use thiserror::Error;

use crate::domain::value_objects::{ContentId, ContentKind, EncounterContext, ModuleId};

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("{entity} references missing {kind} '{missing}' via `{field}`")]
    DanglingReference {
        entity: ContentId,
        field: &'static str,
        kind: ContentKind,
        missing: ContentId,
    },

    #[error("No encounter table registered for {requested} and no GENERIC fallback")]
    NoEncounterTable { requested: EncounterContext },

    #[error("Encounter table for {0} has no entries")]
    EmptyEncounterTable(EncounterContext),

    #[error("Invalid range in {owner}: {field} min {min} exceeds max {max}")]
    InvalidRange {
        owner: String,
        field: &'static str,
        min: String,
        max: String,
    },

    #[error("Invalid drop chance {chance} for {item} in {table}: must be within 0.0..=1.0")]
    InvalidChance {
        table: ContentId,
        item: ContentId,
        chance: f64,
    },

    #[error("Invalid value in {owner}: {reason}")]
    InvalidValue { owner: String, reason: String },

    #[error("Unknown loot table: {0}")]
    UnknownLootTable(ContentId),

    #[error("Duplicate {kind} id {id} in module {module}")]
    DuplicateId {
        module: ModuleId,
        kind: ContentKind,
        id: ContentId,
    },

    #[error("Content module {0} is registered twice")]
    DuplicateModule(ModuleId),
}

impl ContentError {
    /// Shorthand for a min/max violation
    pub fn invalid_range(
        owner: impl std::fmt::Display,
        field: &'static str,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidRange {
            owner: owner.to_string(),
            field,
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}
