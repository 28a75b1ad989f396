//! Wandering-encounter tables
//!
//! A table is keyed by an [`EncounterContext`] and holds weighted entries,
//! each gated by an inclusive challenge-rating range.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ContentError;
use crate::domain::value_objects::{ChallengeRating, ContentId, EncounterContext};

/// One candidate spawn in a weighted encounter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEntry {
    pub creature_id: ContentId,
    pub weight: u32,
    pub min_count: u32,
    pub max_count: u32,
    pub min_challenge_rating: ChallengeRating,
    pub max_challenge_rating: ChallengeRating,
}

impl EncounterEntry {
    /// Entry with weight 1, a count range, and no CR gate beyond 0..=30
    pub fn new(creature_id: impl Into<ContentId>, min_count: u32, max_count: u32) -> Self {
        Self {
            creature_id: creature_id.into(),
            weight: 1,
            min_count,
            max_count,
            min_challenge_rating: ChallengeRating::ZERO,
            max_challenge_rating: ChallengeRating::new(30.0),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_challenge_range(
        mut self,
        min: impl Into<ChallengeRating>,
        max: impl Into<ChallengeRating>,
    ) -> Self {
        self.min_challenge_rating = min.into();
        self.max_challenge_rating = max.into();
        self
    }

    /// True when `budget` falls inside this entry's CR range
    pub fn fits_budget(&self, budget: ChallengeRating) -> bool {
        budget.within(self.min_challenge_rating, self.max_challenge_rating)
    }

    fn validate(&self, context: &EncounterContext) -> Result<(), ContentError> {
        let owner = || format!("encounter table {} entry {}", context, self.creature_id);
        if self.weight == 0 {
            return Err(ContentError::InvalidValue {
                owner: owner(),
                reason: "weight must be at least 1".to_string(),
            });
        }
        if self.min_count == 0 {
            return Err(ContentError::InvalidValue {
                owner: owner(),
                reason: "min_count must be at least 1".to_string(),
            });
        }
        if self.max_count < self.min_count {
            return Err(ContentError::invalid_range(
                owner(),
                "count",
                self.min_count,
                self.max_count,
            ));
        }
        if matches!(
            self.min_challenge_rating.partial_cmp(&self.max_challenge_rating),
            None | Some(Ordering::Greater)
        ) {
            return Err(ContentError::invalid_range(
                owner(),
                "challenge_rating",
                self.min_challenge_rating,
                self.max_challenge_rating,
            ));
        }
        Ok(())
    }
}

/// Entries registered for one context key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTable {
    pub context: EncounterContext,
    pub entries: Vec<EncounterEntry>,
}

impl EncounterTable {
    /// Build a validated table; empty tables are rejected
    pub fn new(
        context: impl Into<EncounterContext>,
        entries: Vec<EncounterEntry>,
    ) -> Result<Self, ContentError> {
        let context = context.into();
        if entries.is_empty() {
            return Err(ContentError::EmptyEncounterTable(context));
        }
        for entry in &entries {
            entry.validate(&context)?;
        }
        if entries
            .iter()
            .try_fold(0u32, |total, e| total.checked_add(e.weight))
            .is_none()
        {
            return Err(ContentError::InvalidValue {
                owner: format!("encounter table {}", context),
                reason: "total weight overflows u32".to_string(),
            });
        }
        Ok(Self { context, entries })
    }

    /// Entries whose CR range contains `budget`
    pub fn entries_for_budget(&self, budget: ChallengeRating) -> Vec<&EncounterEntry> {
        self.entries.iter().filter(|e| e.fits_budget(budget)).collect()
    }
}
