//! Application configuration

use std::env;

use anyhow::{anyhow, Context, Result};

use crate::application::services::ProvisionStrategy;
use crate::domain::value_objects::ChallengeRating;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection URL for the content store
    pub database_url: String,

    /// How the provisioner decides a module is already seeded
    pub seed_strategy: ProvisionStrategy,

    /// Fixed RNG seed; thread-local randomness when unset
    pub rng_seed: Option<u64>,

    /// Party strength for the startup smoke roll
    pub demo_budget: ChallengeRating,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("CONTENT_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://content.db?mode=rwc".to_string()),

            seed_strategy: env::var("CONTENT_SEED_STRATEGY")
                .unwrap_or_else(|_| "per-entity".to_string())
                .parse::<ProvisionStrategy>()
                .map_err(|e: String| anyhow!(e))
                .context("CONTENT_SEED_STRATEGY must be 'per-entity' or 'sentinel'")?,

            rng_seed: match env::var("CONTENT_RNG_SEED") {
                Ok(seed) => Some(
                    seed.parse::<u64>()
                        .context("CONTENT_RNG_SEED must be an unsigned integer")?,
                ),
                Err(_) => None,
            },

            demo_budget: env::var("CONTENT_DEMO_BUDGET")
                .unwrap_or_else(|_| "1".to_string())
                .parse::<f32>()
                .context("CONTENT_DEMO_BUDGET must be a number")
                .map(ChallengeRating::new)?,
        })
    }
}
