//! Repository port - Interface for the content store
//!
//! The store owns persisted entities after provisioning. The provisioner
//! only needs `find_by_id` and `create`; `update` is part of the contract
//! for editors and tooling that adjust seeded data in place.

use async_trait::async_trait;

use crate::domain::entities::ContentEntity;
use crate::domain::value_objects::{ContentId, ContentKind};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("{kind} {id} already exists")]
    Duplicate { kind: ContentKind, id: ContentId },
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Repository port for seeded content of every kind
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStorePort: Send + Sync {
    /// Get an entity by kind and ID
    async fn find_by_id(
        &self,
        kind: ContentKind,
        id: &ContentId,
    ) -> Result<Option<ContentEntity>, StoreError>;

    /// Insert a new entity; fails with `Duplicate` if the ID is taken
    async fn create(&self, entity: &ContentEntity) -> Result<ContentEntity, StoreError>;

    /// Replace an existing entity, returning false when nothing matched
    async fn update(&self, entity: &ContentEntity) -> Result<bool, StoreError>;
}
