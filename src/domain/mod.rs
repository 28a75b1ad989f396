//! Domain layer - Content entities and value objects with no I/O
//!
//! This layer contains:
//! - Entities: abilities, items, loot tables, creatures, locations and the
//!   fixtures and factions that hang off them
//! - Value Objects: content IDs, kinds, challenge ratings, encounter keys
//! - Errors: configuration errors raised while seeding or registering

pub mod entities;
pub mod errors;
pub mod value_objects;
