//! Content bootstrap - Startup orchestration of provisioning and registration
//!
//! Registration is pure in-memory validation, so it runs before anything is
//! written: a broken loot or encounter table, a missing GENERIC fallback, or
//! an encounter entry naming an unknown creature aborts startup with the
//! store untouched. Provisioning runs last.

use std::sync::Arc;

use tracing::{info, instrument};

use super::{
    CatalogProvisioner, CatalogReport, EncounterSelector, LootResolver, ProvisionError,
};
use crate::application::ports::inbound::ModuleRegistry;

/// What a bootstrap run produced
#[derive(Debug, Clone)]
pub struct BootstrapSummary {
    pub catalog: CatalogReport,
    pub loot_tables: usize,
    pub encounter_tables: usize,
}

pub struct ContentBootstrap {
    provisioner: CatalogProvisioner,
    loot: Arc<LootResolver>,
    encounters: Arc<EncounterSelector>,
}

impl ContentBootstrap {
    pub fn new(
        provisioner: CatalogProvisioner,
        loot: Arc<LootResolver>,
        encounters: Arc<EncounterSelector>,
    ) -> Self {
        Self {
            provisioner,
            loot,
            encounters,
        }
    }

    #[instrument(skip_all, fields(modules = registry.len()))]
    pub async fn run(&self, registry: &ModuleRegistry) -> Result<BootstrapSummary, ProvisionError> {
        let definitions = registry.build_all()?;

        let loot_tables = self
            .loot
            .register_all(definitions.iter().flat_map(|d| d.loot_tables().cloned()))?;

        let mut encounter_tables = 0;
        for definition in &definitions {
            for table in &definition.encounter_tables {
                self.encounters.register_table(table.clone());
                encounter_tables += 1;
            }
        }
        self.encounters.ensure_fallback()?;
        info!(
            loot_tables,
            encounter_tables,
            contexts = ?self.encounters.contexts(),
            "Registered content tables"
        );

        self.provisioner
            .check_encounter_references(&definitions)
            .await?;
        let catalog = self.provisioner.provision_all(&definitions).await?;

        Ok(BootstrapSummary {
            catalog,
            loot_tables,
            encounter_tables,
        })
    }
}
