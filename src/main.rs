//! WrldBldr Content - Seeds game content and serves loot and encounter rolls
//!
//! On startup the binary:
//! - Builds every registered content module
//! - Registers loot and encounter tables (failing fast on bad data)
//! - Provisions module content into SQLite, skipping what already exists
//! - Rolls one encounter and its loot as a smoke check

mod application;
mod domain;
mod infrastructure;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::ports::outbound::{ContentStorePort, RandomPort};
use crate::application::services::{
    CatalogProvisioner, ContentBootstrap, EncounterSelector, LootResolver,
};
use crate::domain::entities::ContentEntity;
use crate::domain::value_objects::{Biome, ContentKind};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::content::builtin_registry;
use crate::infrastructure::persistence::SqliteContentStore;
use crate::infrastructure::random::{SeededRandom, ThreadRngAdapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wrldbldr_content=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WrldBldr Content");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Database: {}", config.database_url);
    tracing::info!("  Seed strategy: {:?}", config.seed_strategy);

    let store = SqliteContentStore::connect(&config.database_url)
        .await
        .context("Failed to open content database")?;
    let store = Arc::new(store);

    let loot = Arc::new(LootResolver::new());
    let encounters = Arc::new(EncounterSelector::new());
    let bootstrap = ContentBootstrap::new(
        CatalogProvisioner::new(store.clone()).with_strategy(config.seed_strategy),
        loot.clone(),
        encounters.clone(),
    );

    let registry = builtin_registry()?;
    tracing::info!(modules = ?registry.module_ids(), "Content modules registered");
    let summary = bootstrap
        .run(&registry)
        .await
        .context("Content bootstrap failed")?;
    tracing::info!(
        modules = summary.catalog.modules.len(),
        loot_tables = summary.loot_tables,
        encounter_tables = summary.encounter_tables,
        "Content bootstrap finished"
    );
    for kind in ContentKind::SEED_ORDER {
        let rows = store.count(kind).await?;
        tracing::debug!(kind = %kind, rows, "Stored content");
    }

    let rng: Box<dyn RandomPort> = match config.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "Using seeded RNG");
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRngAdapter::new()),
    };

    // Smoke roll: one forest encounter and whatever the creatures drop
    let report = encounters.select(Biome::Forest, config.demo_budget, rng.as_ref())?;
    tracing::info!(
        context = %report.resolved,
        budget = %report.budget,
        off_budget = report.off_budget,
        "Rolled encounter"
    );
    for spawn in &report.spawns {
        tracing::info!(creature = %spawn.creature_id, count = spawn.count, "Spawn");
        let Some(ContentEntity::Creature(creature)) = store
            .find_by_id(ContentKind::Creature, &spawn.creature_id)
            .await?
        else {
            tracing::warn!(creature = %spawn.creature_id, "Spawned creature is not in the store");
            continue;
        };
        for _ in 0..spawn.count {
            for loot_drop in loot.drops_for_creature(&creature, rng.as_ref())? {
                tracing::info!(item = %loot_drop.item_id, quantity = loot_drop.quantity, "Loot");
            }
        }
    }

    tracing::info!("Content ready");
    Ok(())
}
