//! Encounter selector - Weighted, CR-gated wandering-encounter rolls
//!
//! One `select` call expands exactly one table entry into a spawn (one
//! creature type, possibly several individuals). Mixed groups are built by
//! calling `select` repeatedly.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, instrument, warn};

use crate::application::ports::outbound::RandomPort;
use crate::domain::entities::{EncounterEntry, EncounterTable};
use crate::domain::errors::ContentError;
use crate::domain::value_objects::{ChallengeRating, ContentId, EncounterContext};

/// Creatures to spawn for one encounter entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spawn {
    pub creature_id: ContentId,
    pub count: u32,
}

/// Result of a selection, with enough detail for callers to tune tables
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterReport {
    /// Context the caller asked for
    pub requested: EncounterContext,
    /// Context whose table was rolled
    pub resolved: EncounterContext,
    pub budget: ChallengeRating,
    /// No entry fit the budget, so the unfiltered table was used
    pub off_budget: bool,
    pub spawns: Vec<Spawn>,
}

impl EncounterReport {
    pub fn used_generic_fallback(&self) -> bool {
        self.requested != self.resolved
    }
}

/// Cumulative-sum weighted choice with a single uniform draw
///
/// Returns `None` only when the total weight is zero.
pub fn pick_weighted<'a>(
    entries: &[&'a EncounterEntry],
    rng: &dyn RandomPort,
) -> Option<&'a EncounterEntry> {
    let total = entries
        .iter()
        .try_fold(0u32, |sum, e| sum.checked_add(e.weight))?;
    if total == 0 {
        return None;
    }

    let roll = rng.random_range(0, total - 1);
    let mut cumulative = 0u32;
    for &entry in entries {
        cumulative += entry.weight;
        if roll < cumulative {
            return Some(entry);
        }
    }
    None
}

/// Expand a chosen entry into a spawn with a uniformly drawn count
pub fn roll_spawn(entry: &EncounterEntry, rng: &dyn RandomPort) -> Spawn {
    let count = if entry.min_count == entry.max_count {
        entry.min_count
    } else {
        rng.random_range(entry.min_count, entry.max_count)
    };
    Spawn {
        creature_id: entry.creature_id.clone(),
        count,
    }
}

/// Registry of encounter tables keyed by context
#[derive(Default)]
pub struct EncounterSelector {
    tables: DashMap<EncounterContext, Arc<EncounterTable>>,
}

impl EncounterSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register entries for `context`, replacing any previous table
    pub fn register(
        &self,
        context: impl Into<EncounterContext>,
        entries: Vec<EncounterEntry>,
    ) -> Result<(), ContentError> {
        self.register_table(EncounterTable::new(context, entries)?);
        Ok(())
    }

    /// Register an already validated table
    pub fn register_table(&self, table: EncounterTable) {
        let context = table.context.clone();
        let entries = table.entries.len();
        if self.tables.insert(context.clone(), Arc::new(table)).is_some() {
            debug!(context = %context, entries, "Replaced encounter table");
        } else {
            debug!(context = %context, entries, "Registered encounter table");
        }
    }

    /// Fail unless the GENERIC fallback table is registered
    pub fn ensure_fallback(&self) -> Result<(), ContentError> {
        if self.tables.contains_key(&EncounterContext::generic()) {
            Ok(())
        } else {
            Err(ContentError::NoEncounterTable {
                requested: EncounterContext::generic(),
            })
        }
    }

    pub fn table(&self, context: &EncounterContext) -> Option<Arc<EncounterTable>> {
        self.tables.get(context).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contexts(&self) -> Vec<EncounterContext> {
        let mut contexts: Vec<_> = self.tables.iter().map(|e| e.key().clone()).collect();
        contexts.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        contexts
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Roll one encounter for `context` at party strength `budget`
    #[instrument(
        skip_all,
        fields(requested = tracing::field::Empty, budget = tracing::field::Empty)
    )]
    pub fn select(
        &self,
        context: impl Into<EncounterContext>,
        budget: impl Into<ChallengeRating>,
        rng: &dyn RandomPort,
    ) -> Result<EncounterReport, ContentError> {
        let requested = context.into();
        let budget = budget.into();
        let span = tracing::Span::current();
        span.record("requested", requested.as_str());
        span.record("budget", budget.value());

        let table = match self.table(&requested) {
            Some(table) => table,
            None => {
                debug!(requested = %requested, "No encounter table, falling back to GENERIC");
                self.table(&EncounterContext::generic()).ok_or_else(|| {
                    ContentError::NoEncounterTable {
                        requested: requested.clone(),
                    }
                })?
            }
        };

        let mut candidates = table.entries_for_budget(budget);
        let off_budget = candidates.is_empty();
        if off_budget {
            warn!(
                context = %table.context,
                budget = %budget,
                "No encounter entry fits the challenge budget, using unfiltered table"
            );
            candidates = table.entries.iter().collect();
        }

        let spawns = match pick_weighted(&candidates, rng) {
            Some(entry) => vec![roll_spawn(entry, rng)],
            None => {
                warn!(context = %table.context, "Encounter candidates have no weight");
                Vec::new()
            }
        };

        Ok(EncounterReport {
            requested,
            resolved: table.context.clone(),
            budget,
            off_budget,
            spawns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockRandomPort;
    use crate::infrastructure::random::SeededRandom;
    use crate::infrastructure::testing::{FixedRandom, SequenceRandom};

    fn forest_entries() -> Vec<EncounterEntry> {
        vec![
            EncounterEntry::new("creature-b1-wolf", 2, 4)
                .with_weight(5)
                .with_challenge_range(0u32, 2u32),
            EncounterEntry::new("creature-b1-bandit", 2, 6)
                .with_weight(3)
                .with_challenge_range(1u32, 3u32),
            EncounterEntry::new("creature-b1-troll", 1, 1)
                .with_weight(1)
                .with_challenge_range(4u32, 8u32),
        ]
    }

    fn selector() -> EncounterSelector {
        let selector = EncounterSelector::new();
        selector.register("FOREST", forest_entries()).unwrap();
        selector
            .register(
                EncounterContext::generic(),
                vec![
                    EncounterEntry::new("creature-b1-goblin", 1, 6).with_weight(3),
                    EncounterEntry::new("creature-b1-orc", 1, 4).with_weight(1),
                ],
            )
            .unwrap();
        selector
    }

    #[test]
    fn test_cr_filter_excludes_out_of_range_entries() {
        let selector = selector();
        let rng = SeededRandom::new(11);

        for _ in 0..5_000 {
            let report = selector.select("FOREST", 1u32, &rng).unwrap();
            assert!(!report.off_budget);
            let spawn = &report.spawns[0];
            assert_ne!(spawn.creature_id.as_str(), "creature-b1-troll");

            let entry = forest_entries()
                .into_iter()
                .find(|e| e.creature_id == spawn.creature_id)
                .unwrap();
            assert!(entry.min_challenge_rating.value() <= 1.0);
            assert!(entry.max_challenge_rating.value() >= 1.0);
            assert!((entry.min_count..=entry.max_count).contains(&spawn.count));
        }
    }

    #[test]
    fn test_unknown_biome_uses_generic_table() {
        let selector = selector();
        let unknown_rng = SeededRandom::new(42);
        let generic_rng = SeededRandom::new(42);

        for _ in 0..500 {
            let unknown = selector.select("UNKNOWN_BIOME", 2u32, &unknown_rng).unwrap();
            let generic = selector.select("GENERIC", 2u32, &generic_rng).unwrap();

            assert!(unknown.used_generic_fallback());
            assert!(!generic.used_generic_fallback());
            assert_eq!(unknown.resolved, EncounterContext::generic());
            assert_eq!(unknown.spawns, generic.spawns);
        }
    }

    #[test]
    fn test_missing_generic_is_a_configuration_error() {
        let selector = EncounterSelector::new();
        selector.register("FOREST", forest_entries()).unwrap();

        assert_eq!(
            selector.select("DESERT", 1u32, &FixedRandom::new(0.0, 0)),
            Err(ContentError::NoEncounterTable {
                requested: "DESERT".into()
            })
        );
        assert!(selector.ensure_fallback().is_err());
        assert!(self::selector().ensure_fallback().is_ok());
    }

    #[test]
    fn test_weights_three_to_one() {
        let selector = EncounterSelector::new();
        selector
            .register(
                "PLAINS",
                vec![
                    EncounterEntry::new("creature-b1-wolf", 1, 1).with_weight(3),
                    EncounterEntry::new("creature-b1-lion", 1, 1).with_weight(1),
                ],
            )
            .unwrap();
        let rng = SeededRandom::new(2024);

        let draws = 100_000;
        let mut wolves = 0;
        for _ in 0..draws {
            let report = selector.select("PLAINS", 1u32, &rng).unwrap();
            if report.spawns[0].creature_id.as_str() == "creature-b1-wolf" {
                wolves += 1;
            }
        }

        let share = wolves as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.01, "wolf share was {}", share);
    }

    #[test]
    fn test_off_budget_falls_back_to_unfiltered_table() {
        let selector = selector();
        let rng = SeededRandom::new(5);

        let report = selector.select("FOREST", 20u32, &rng).unwrap();

        assert!(report.off_budget);
        assert_eq!(report.spawns.len(), 1);
        assert_eq!(report.resolved, EncounterContext::from("FOREST"));
    }

    #[test]
    fn test_pick_weighted_walks_cumulative_sum() {
        let entries = forest_entries();
        let refs: Vec<_> = entries.iter().collect();

        // weights 5, 3, 1 -> rolls 0..=4 wolf, 5..=7 bandit, 8 troll
        let rng = SequenceRandom::new(vec![0.0], vec![4, 5, 7, 8]);
        let picks: Vec<_> = (0..4)
            .map(|_| pick_weighted(&refs, &rng).unwrap().creature_id.as_str().to_string())
            .collect();

        assert_eq!(
            picks,
            vec![
                "creature-b1-wolf",
                "creature-b1-bandit",
                "creature-b1-bandit",
                "creature-b1-troll",
            ]
        );
    }

    #[test]
    fn test_select_draws_weight_then_count() {
        let selector = selector();
        let mut rng = MockRandomPort::new();
        let mut seq = mockall::Sequence::new();
        // wolf and bandit fit CR 1: total weight 8
        rng.expect_random_range()
            .withf(|min, max| *min == 0 && *max == 7)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(6u32);
        rng.expect_random_range()
            .withf(|min, max| *min == 2 && *max == 6)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(5u32);

        let report = selector.select("forest", 1u32, &rng).unwrap();

        assert_eq!(
            report.spawns,
            vec![Spawn {
                creature_id: "creature-b1-bandit".into(),
                count: 5,
            }]
        );
    }

    #[test]
    fn test_reregistration_overwrites() {
        let selector = selector();
        selector
            .register("FOREST", vec![EncounterEntry::new("creature-b1-bear", 1, 1)])
            .unwrap();

        assert_eq!(selector.len(), 2);
        let report = selector.select("FOREST", 1u32, &FixedRandom::new(0.0, 0)).unwrap();
        assert_eq!(report.spawns[0].creature_id.as_str(), "creature-b1-bear");
    }

    #[test]
    fn test_register_rejects_empty_entries() {
        let selector = EncounterSelector::new();
        assert!(matches!(
            selector.register(EncounterContext::indoor(), vec![]),
            Err(ContentError::EmptyEncounterTable(_))
        ));
        assert!(selector.is_empty());
    }
}
