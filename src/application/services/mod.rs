//! Application services - Use case implementations
//!
//! Provisioning writes module content to the store at startup; the loot
//! resolver and encounter selector answer gameplay queries against tables
//! registered at the same time.

pub mod catalog_provisioner;
pub mod content_bootstrap;
pub mod encounter_selector;
pub mod loot_resolver;
pub mod module_builder;

pub use catalog_provisioner::{
    CatalogProvisioner, CatalogReport, KindCounts, ModuleOutcome, ProvisionError,
    ProvisionReport, ProvisionStrategy,
};
pub use content_bootstrap::{BootstrapSummary, ContentBootstrap};
pub use encounter_selector::{pick_weighted, roll_spawn, EncounterReport, EncounterSelector, Spawn};
pub use loot_resolver::{roll_loot, LootDrop, LootResolver};
pub use module_builder::{ModuleBuilder, ModuleDefinition};
