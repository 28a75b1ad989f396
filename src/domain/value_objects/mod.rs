//! Value objects - Immutable objects defined by their attributes

mod challenge_rating;
mod content_kind;
mod encounter_context;
mod ids;

pub use challenge_rating::ChallengeRating;
pub use content_kind::ContentKind;
pub use encounter_context::{Biome, EncounterContext};
pub use ids::{ContentId, ModuleId};
