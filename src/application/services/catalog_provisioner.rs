//! Catalog provisioner - Writes module content to the store exactly once
//!
//! Provisioning a module runs in three steps:
//! 1. Validate: batches are put in dependency order, duplicate IDs and
//!    dangling references abort the module before anything is written.
//! 2. Optionally skip the whole module when its sentinel entity exists
//!    ([`ProvisionStrategy::Sentinel`]).
//! 3. For every entity, insert it if absent and leave it untouched if
//!    present. A module that crashed half-way resumes on the next run.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use super::ModuleDefinition;
use crate::application::ports::outbound::{ContentStorePort, StoreError};
use crate::domain::entities::{ContentBatch, ContentEntity};
use crate::domain::errors::ContentError;
use crate::domain::value_objects::{ContentId, ContentKind, ModuleId};

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// How to decide whether a module was already seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvisionStrategy {
    /// Check every entity; partially seeded modules are completed
    #[default]
    PerEntity,
    /// Skip the module when its sentinel entity exists
    Sentinel,
}

impl std::str::FromStr for ProvisionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-entity" | "per_entity" | "entity" => Ok(Self::PerEntity),
            "sentinel" => Ok(Self::Sentinel),
            other => Err(format!("unknown seed strategy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// Every entity was inserted by this run
    Seeded,
    /// Some entities existed from an earlier run and the rest were inserted
    Resumed,
    /// Nothing was inserted
    Skipped,
}

impl std::fmt::Display for ModuleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seeded => f.write_str("seeded"),
            Self::Resumed => f.write_str("resumed"),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub inserted: usize,
    pub existing: usize,
}

impl KindCounts {
    fn add(&mut self, other: KindCounts) {
        self.inserted += other.inserted;
        self.existing += other.existing;
    }
}

/// What provisioning did for one module
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub module_id: ModuleId,
    pub outcome: ModuleOutcome,
    pub sentinel: Option<ContentId>,
    pub counts: BTreeMap<ContentKind, KindCounts>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ProvisionReport {
    pub fn inserted(&self) -> usize {
        self.counts.values().map(|c| c.inserted).sum()
    }

    pub fn existing(&self) -> usize {
        self.counts.values().map(|c| c.existing).sum()
    }

    pub fn count(&self, kind: ContentKind) -> KindCounts {
        self.counts.get(&kind).copied().unwrap_or_default()
    }
}

/// Reports for a whole provisioning run
#[derive(Debug, Clone, Default)]
pub struct CatalogReport {
    pub modules: Vec<ProvisionReport>,
}

impl CatalogReport {
    /// Per-kind counts summed over all modules
    pub fn totals(&self) -> BTreeMap<ContentKind, KindCounts> {
        let mut totals: BTreeMap<ContentKind, KindCounts> = BTreeMap::new();
        for report in &self.modules {
            for (kind, counts) in &report.counts {
                totals.entry(*kind).or_default().add(*counts);
            }
        }
        totals
    }

    pub fn log_summary(&self) {
        let seeded = self
            .modules
            .iter()
            .filter(|r| r.outcome != ModuleOutcome::Skipped)
            .count();
        info!(
            modules = self.modules.len(),
            seeded,
            skipped = self.modules.len() - seeded,
            "Content provisioning complete"
        );
        for (kind, counts) in self.totals() {
            info!(
                inserted = counts.inserted,
                existing = counts.existing,
                "  {}",
                kind.plural()
            );
        }
    }
}

pub struct CatalogProvisioner {
    store: Arc<dyn ContentStorePort>,
    strategy: ProvisionStrategy,
}

impl CatalogProvisioner {
    pub fn new(store: Arc<dyn ContentStorePort>) -> Self {
        Self {
            store,
            strategy: ProvisionStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ProvisionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Provision every module in order and log a per-kind summary
    pub async fn provision_all(
        &self,
        definitions: &[ModuleDefinition],
    ) -> Result<CatalogReport, ProvisionError> {
        let mut report = CatalogReport::default();
        for definition in definitions {
            report
                .modules
                .push(self.provision(&definition.module_id, &definition.batches).await?);
        }
        report.log_summary();
        Ok(report)
    }

    /// Check that every encounter entry names a creature declared by some
    /// module or already in the store
    pub async fn check_encounter_references(
        &self,
        definitions: &[ModuleDefinition],
    ) -> Result<(), ProvisionError> {
        let declared: HashSet<&ContentId> = definitions
            .iter()
            .flat_map(|d| d.batches.iter())
            .filter(|batch| batch.kind == ContentKind::Creature)
            .flat_map(|batch| batch.entities.iter().map(ContentEntity::id))
            .collect();

        for table in definitions.iter().flat_map(|d| d.encounter_tables.iter()) {
            for entry in &table.entries {
                if declared.contains(&entry.creature_id) {
                    continue;
                }
                if self
                    .store
                    .find_by_id(ContentKind::Creature, &entry.creature_id)
                    .await?
                    .is_some()
                {
                    continue;
                }
                return Err(ContentError::DanglingReference {
                    entity: ContentId::from(format!("encounter-{}", table.context)),
                    field: "creature_id",
                    kind: ContentKind::Creature,
                    missing: entry.creature_id.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Provision one module's batches
    #[instrument(skip(self, batches), fields(module_id = %module_id))]
    pub async fn provision(
        &self,
        module_id: &ModuleId,
        batches: &[ContentBatch],
    ) -> Result<ProvisionReport, ProvisionError> {
        let started_at = Utc::now();
        let mut ordered: Vec<&ContentBatch> = batches.iter().collect();
        ordered.sort_by_key(|batch| batch.kind);

        self.validate(module_id, &ordered).await?;

        let sentinel = sentinel_of(&ordered);
        if self.strategy == ProvisionStrategy::Sentinel {
            if let Some(entity) = sentinel {
                if self.store.find_by_id(entity.kind(), entity.id()).await?.is_some() {
                    info!(sentinel = %entity.id(), "Module {} already seeded, skipping", module_id);
                    return Ok(ProvisionReport {
                        module_id: module_id.clone(),
                        outcome: ModuleOutcome::Skipped,
                        sentinel: Some(entity.id().clone()),
                        counts: BTreeMap::new(),
                        started_at,
                        finished_at: Utc::now(),
                    });
                }
            }
        }

        let mut counts: BTreeMap<ContentKind, KindCounts> = BTreeMap::new();
        for batch in &ordered {
            let batch_counts = self.apply_batch(batch).await?;
            counts.entry(batch.kind).or_default().add(batch_counts);
        }

        let inserted: usize = counts.values().map(|c| c.inserted).sum();
        let existing: usize = counts.values().map(|c| c.existing).sum();
        let outcome = match (inserted, existing) {
            (0, _) => ModuleOutcome::Skipped,
            (_, 0) => ModuleOutcome::Seeded,
            _ => ModuleOutcome::Resumed,
        };
        info!(inserted, existing, "Module {} {}", module_id, outcome);

        Ok(ProvisionReport {
            module_id: module_id.clone(),
            outcome,
            sentinel: sentinel.map(|e| e.id().clone()),
            counts,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn apply_batch(&self, batch: &ContentBatch) -> Result<KindCounts, ProvisionError> {
        let mut counts = KindCounts::default();
        for entity in &batch.entities {
            if self.store.find_by_id(entity.kind(), entity.id()).await?.is_some() {
                counts.existing += 1;
                continue;
            }
            match self.store.create(entity).await {
                Ok(_) => {
                    debug!(kind = %entity.kind(), id = %entity.id(), "Created {}", entity.name());
                    counts.inserted += 1;
                }
                // Another writer got there between the check and the insert
                Err(StoreError::Duplicate { .. }) => counts.existing += 1,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(counts)
    }

    /// Reject mixed batches, duplicate IDs and dangling references
    ///
    /// A reference resolves when its target is declared in an earlier batch,
    /// in the same batch, or already exists in the store.
    async fn validate(
        &self,
        module_id: &ModuleId,
        ordered: &[&ContentBatch],
    ) -> Result<(), ProvisionError> {
        let mut known: HashSet<(ContentKind, ContentId)> = HashSet::new();

        for batch in ordered {
            for entity in &batch.entities {
                if entity.kind() != batch.kind {
                    return Err(ContentError::InvalidValue {
                        owner: format!("batch {}", batch.name),
                        reason: format!(
                            "{} {} in a {} batch",
                            entity.kind(),
                            entity.id(),
                            batch.kind
                        ),
                    }
                    .into());
                }
                if !known.insert((entity.kind(), entity.id().clone())) {
                    return Err(ContentError::DuplicateId {
                        module: module_id.clone(),
                        kind: entity.kind(),
                        id: entity.id().clone(),
                    }
                    .into());
                }
            }
        }

        // Only earlier batches and the current one are visible while walking
        let mut visible: HashSet<(ContentKind, ContentId)> = HashSet::new();
        for batch in ordered {
            visible.extend(
                batch
                    .entities
                    .iter()
                    .map(|e| (e.kind(), e.id().clone())),
            );
            for entity in &batch.entities {
                for reference in entity.references() {
                    let key = (reference.kind, reference.id.clone());
                    if visible.contains(&key) {
                        continue;
                    }
                    if self
                        .store
                        .find_by_id(reference.kind, &reference.id)
                        .await?
                        .is_some()
                    {
                        visible.insert(key);
                        continue;
                    }
                    return Err(ContentError::DanglingReference {
                        entity: entity.id().clone(),
                        field: reference.field,
                        kind: reference.kind,
                        missing: reference.id,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// First creature, else first location, else first entity of the first
/// non-empty batch
fn sentinel_of<'a>(ordered: &[&'a ContentBatch]) -> Option<&'a ContentEntity> {
    let first_of = |kind: ContentKind| {
        ordered
            .iter()
            .filter(|batch| batch.kind == kind)
            .find_map(|batch| batch.entities.first())
    };
    first_of(ContentKind::Creature)
        .or_else(|| first_of(ContentKind::Location))
        .or_else(|| ordered.iter().find_map(|batch| batch.entities.first()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockContentStorePort;
    use crate::application::services::ModuleBuilder;
    use crate::domain::entities::{
        Ability, Creature, Direction, Item, ItemType, Location, LocationExit, LocationType,
        LootEntry,
    };
    use crate::infrastructure::persistence::InMemoryContentStore;

    fn rat_module(module: &str) -> ModuleDefinition {
        let mut b = ModuleBuilder::new(module);
        let bite = b.ability("bite", |a| a.damage_dice = Some("1d3".to_string()));
        let tail = b.item("rat-tail", ItemType::Material, |_| {});
        let table = b.loot_table("rat", |t| {
            t.entries.push(LootEntry::guaranteed(tail.id.clone(), 1));
        });
        let rat = b.creature("giant-rat", |c| {
            c.ability_ids.push(bite.id.clone());
            c.loot_table_id = Some(table.id.clone());
        });
        let nest_id = b.id(ContentKind::Location, "nest");
        let tunnel = b.location("tunnel", LocationType::Interior, |l| {
            l.exits.push(LocationExit::new(Direction::North, nest_id.clone()));
        });
        b.location("nest", LocationType::Interior, |l| {
            l.creature_ids.push(rat.id.clone());
        });
        b.chest("nest-chest", &tunnel.id, |c| c.loot_table_id = Some(table.id.clone()));
        b.build().unwrap()
    }

    fn provisioner(store: &Arc<InMemoryContentStore>) -> CatalogProvisioner {
        CatalogProvisioner::new(store.clone())
    }

    #[tokio::test]
    async fn test_provision_is_idempotent() {
        let store = Arc::new(InMemoryContentStore::new());
        let definition = rat_module("b1");
        let provisioner = provisioner(&store);

        let first = provisioner
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();
        let after_first = store.snapshot().await;
        let second = provisioner
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();

        assert_eq!(first.outcome, ModuleOutcome::Seeded);
        assert_eq!(first.inserted(), 7);
        assert_eq!(first.count(ContentKind::Location).inserted, 2);
        assert_eq!(second.outcome, ModuleOutcome::Skipped);
        assert_eq!(second.inserted(), 0);
        assert_eq!(second.existing(), 7);
        assert_eq!(store.snapshot().await, after_first);
    }

    #[tokio::test]
    async fn test_provision_never_overwrites_edits() {
        let store = Arc::new(InMemoryContentStore::new());
        let definition = rat_module("b1");
        let provisioner = provisioner(&store);
        provisioner
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();

        let id = ContentId::from("creature-b1-giant-rat");
        let Some(ContentEntity::Creature(mut rat)) =
            store.find_by_id(ContentKind::Creature, &id).await.unwrap()
        else {
            panic!("rat was not seeded");
        };
        rat.hit_points = 99;
        assert!(store.update(&ContentEntity::Creature(rat)).await.unwrap());

        provisioner
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();

        let Some(ContentEntity::Creature(rat)) =
            store.find_by_id(ContentKind::Creature, &id).await.unwrap()
        else {
            panic!("rat disappeared");
        };
        assert_eq!(rat.hit_points, 99);
    }

    #[tokio::test]
    async fn test_partially_seeded_module_resumes() {
        let store = Arc::new(InMemoryContentStore::new());
        let definition = rat_module("b1");

        // Simulate a crash after the creature batch
        for batch in definition
            .batches
            .iter()
            .filter(|b| b.kind <= ContentKind::Creature)
        {
            for entity in &batch.entities {
                store.create(entity).await.unwrap();
            }
        }

        let report = provisioner(&store)
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();

        assert_eq!(report.outcome, ModuleOutcome::Resumed);
        assert_eq!(report.existing(), 4);
        assert_eq!(report.inserted(), 3);
        assert_eq!(store.len().await, 7);
    }

    #[tokio::test]
    async fn test_sentinel_strategy_skips_when_sentinel_exists() {
        let store = Arc::new(InMemoryContentStore::new());
        let definition = rat_module("b1");
        let creatures = definition
            .batches
            .iter()
            .find(|b| b.kind == ContentKind::Creature)
            .unwrap();
        for batch in definition.batches.iter().filter(|b| b.kind < ContentKind::Creature) {
            for entity in &batch.entities {
                store.create(entity).await.unwrap();
            }
        }
        store.create(&creatures.entities[0]).await.unwrap();

        let report = provisioner(&store)
            .with_strategy(ProvisionStrategy::Sentinel)
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();

        assert_eq!(report.outcome, ModuleOutcome::Skipped);
        assert_eq!(report.sentinel, Some(ContentId::from("creature-b1-giant-rat")));
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_dangling_reference_fails_before_writing() {
        let store = Arc::new(InMemoryContentStore::new());
        let mut b = ModuleBuilder::new("b1");
        b.item("torch", ItemType::Miscellaneous, |_| {});
        b.creature("kobold", |c| c.loot_table_id = Some("loot-b1-missing".into()));
        let definition = b.build().unwrap();

        let err = provisioner(&store)
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap_err();

        match err {
            ProvisionError::Content(ContentError::DanglingReference {
                entity,
                field,
                kind,
                missing,
            }) => {
                assert_eq!(entity.as_str(), "creature-b1-kobold");
                assert_eq!(field, "loot_table_id");
                assert_eq!(kind, ContentKind::LootTable);
                assert_eq!(missing.as_str(), "loot-b1-missing");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_mixed_batch_is_rejected() {
        let store = Arc::new(InMemoryContentStore::new());
        let mut batch = ContentBatch::new(ContentKind::Item);
        batch
            .entities
            .push(Ability::new("ability-b1-bite".into(), "Bite").into());

        let result = provisioner(&store).provision(&"b1".into(), &[batch]).await;

        assert!(matches!(
            result,
            Err(ProvisionError::Content(ContentError::InvalidValue { .. }))
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_reference_to_other_module_resolves_from_store() {
        let store = Arc::new(InMemoryContentStore::new());
        let provisioner = provisioner(&store);
        let core = rat_module("core");
        provisioner
            .provision(&core.module_id, &core.batches)
            .await
            .unwrap();

        let mut b = ModuleBuilder::new("b2");
        b.creature("rat-king", |c| {
            c.loot_table_id = Some("loot-core-rat".into());
        });
        let definition = b.build().unwrap();

        let report = provisioner
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();
        assert_eq!(report.outcome, ModuleOutcome::Seeded);
        assert_eq!(report.inserted(), 1);
    }

    #[tokio::test]
    async fn test_batches_are_applied_in_dependency_order() {
        let store = Arc::new(InMemoryContentStore::new());
        let mut definition = rat_module("b1");
        definition.batches.reverse();

        let report = provisioner(&store)
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();

        assert_eq!(report.outcome, ModuleOutcome::Seeded);
        let order = store.insertion_order().await;
        assert_eq!(order.first().map(|(kind, _)| *kind), Some(ContentKind::Ability));
        assert_eq!(order.last().map(|(kind, _)| *kind), Some(ContentKind::Chest));
    }

    #[tokio::test]
    async fn test_provision_all_aggregates_counts() {
        let store = Arc::new(InMemoryContentStore::new());
        let definitions = vec![rat_module("b1"), rat_module("b2")];

        let report = provisioner(&store).provision_all(&definitions).await.unwrap();

        assert_eq!(report.modules.len(), 2);
        let totals = report.totals();
        assert_eq!(totals[&ContentKind::Creature].inserted, 2);
        assert_eq!(totals[&ContentKind::Location].inserted, 4);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockContentStorePort::new();
        store
            .expect_find_by_id()
            .returning(|_, _| Err(StoreError::Database("connection reset".to_string())));
        let provisioner = CatalogProvisioner::new(Arc::new(store));
        let definition = rat_module("b1");

        let result = provisioner
            .provision(&definition.module_id, &definition.batches)
            .await;

        assert!(matches!(result, Err(ProvisionError::Store(StoreError::Database(_)))));
    }

    #[tokio::test]
    async fn test_duplicate_on_create_counts_as_existing() {
        let mut store = MockContentStorePort::new();
        store.expect_find_by_id().returning(|_, _| Ok(None));
        store.expect_create().returning(|entity| {
            Err(StoreError::Duplicate {
                kind: entity.kind(),
                id: entity.id().clone(),
            })
        });
        let mut b = ModuleBuilder::new("b1");
        b.item("torch", ItemType::Miscellaneous, |_| {});
        let definition = b.build().unwrap();

        let report = CatalogProvisioner::new(Arc::new(store))
            .provision(&definition.module_id, &definition.batches)
            .await
            .unwrap();

        assert_eq!(report.outcome, ModuleOutcome::Skipped);
        assert_eq!(report.count(ContentKind::Item).existing, 1);
    }

    #[test]
    fn test_strategy_parses_from_config() {
        assert_eq!("sentinel".parse::<ProvisionStrategy>(), Ok(ProvisionStrategy::Sentinel));
        assert_eq!("Per-Entity".parse::<ProvisionStrategy>(), Ok(ProvisionStrategy::PerEntity));
        assert!("sometimes".parse::<ProvisionStrategy>().is_err());
    }

    fn batch(kind: ContentKind, entities: Vec<ContentEntity>) -> ContentBatch {
        let mut batch = ContentBatch::new(kind);
        for entity in entities {
            batch.push(entity).unwrap();
        }
        batch
    }

    #[test]
    fn test_sentinel_prefers_creature_then_location_then_first_entity() {
        let items = batch(
            ContentKind::Item,
            vec![Item::new("item-b1-coin".into(), "Coin", ItemType::Currency).into()],
        );
        let locations = batch(
            ContentKind::Location,
            vec![Location::new("location-b1-hall".into(), "Hall", LocationType::Interior).into()],
        );
        let creatures = batch(
            ContentKind::Creature,
            vec![Creature::new("creature-b1-rat".into(), "Rat").into()],
        );

        let all = [&items, &creatures, &locations];
        assert_eq!(
            sentinel_of(&all).map(ContentEntity::id),
            Some(&ContentId::from("creature-b1-rat"))
        );

        let no_creatures = [&items, &locations];
        assert_eq!(
            sentinel_of(&no_creatures).map(ContentEntity::id),
            Some(&ContentId::from("location-b1-hall"))
        );

        let items_only = [&items];
        assert_eq!(
            sentinel_of(&items_only).map(ContentEntity::id),
            Some(&ContentId::from("item-b1-coin"))
        );

        assert!(sentinel_of(&[]).is_none());
    }
}
