//! In-memory content store for tests and dry runs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{ContentStorePort, StoreError};
use crate::domain::entities::ContentEntity;
use crate::domain::value_objects::{ContentId, ContentKind};

type Key = (ContentKind, ContentId);

#[derive(Default)]
struct Inner {
    entities: HashMap<Key, ContentEntity>,
    order: Vec<Key>,
}

/// `ContentStorePort` backed by a map; remembers insertion order
#[derive(Default)]
pub struct InMemoryContentStore {
    inner: RwLock<Inner>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entities.is_empty()
    }

    /// Ordered copy of everything stored
    pub async fn snapshot(&self) -> BTreeMap<Key, ContentEntity> {
        self.inner
            .read()
            .await
            .entities
            .iter()
            .map(|(key, entity)| (key.clone(), entity.clone()))
            .collect()
    }

    /// Keys in the order `create` accepted them
    pub async fn insertion_order(&self) -> Vec<Key> {
        self.inner.read().await.order.clone()
    }
}

#[async_trait]
impl ContentStorePort for InMemoryContentStore {
    async fn find_by_id(
        &self,
        kind: ContentKind,
        id: &ContentId,
    ) -> Result<Option<ContentEntity>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.entities.get(&(kind, id.clone())).cloned())
    }

    async fn create(&self, entity: &ContentEntity) -> Result<ContentEntity, StoreError> {
        let key = (entity.kind(), entity.id().clone());
        let mut inner = self.inner.write().await;
        if inner.entities.contains_key(&key) {
            return Err(StoreError::Duplicate {
                kind: key.0,
                id: key.1,
            });
        }
        inner.entities.insert(key.clone(), entity.clone());
        inner.order.push(key);
        Ok(entity.clone())
    }

    async fn update(&self, entity: &ContentEntity) -> Result<bool, StoreError> {
        let key = (entity.kind(), entity.id().clone());
        let mut inner = self.inner.write().await;
        match inner.entities.get_mut(&key) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Item, ItemType};

    fn coin() -> ContentEntity {
        Item::new("item-b1-coin".into(), "Coin", ItemType::Currency).into()
    }

    #[tokio::test]
    async fn test_create_then_duplicate() {
        let store = InMemoryContentStore::new();
        store.create(&coin()).await.unwrap();

        assert!(matches!(
            store.create(&coin()).await,
            Err(StoreError::Duplicate { kind: ContentKind::Item, .. })
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_only_touches_existing_rows() {
        let store = InMemoryContentStore::new();
        assert!(!store.update(&coin()).await.unwrap());

        store.create(&coin()).await.unwrap();
        let mut item = Item::new("item-b1-coin".into(), "Gold Coin", ItemType::Currency);
        item.value = 10;
        assert!(store.update(&item.into()).await.unwrap());

        let found = store
            .find_by_id(ContentKind::Item, &"item-b1-coin".into())
            .await
            .unwrap();
        assert_eq!(found.map(|e| e.name().to_string()), Some("Gold Coin".to_string()));
    }

    #[tokio::test]
    async fn test_lookup_is_scoped_by_kind() {
        let store = InMemoryContentStore::new();
        store.create(&coin()).await.unwrap();

        let found = store
            .find_by_id(ContentKind::Ability, &"item-b1-coin".into())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
