//! SQLite content store - Content entities as JSON rows keyed by kind and ID

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::debug;

use crate::application::ports::outbound::{ContentStorePort, StoreError};
use crate::domain::entities::ContentEntity;
use crate::domain::value_objects::{ContentId, ContentKind};

fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

/// SQLite-backed content store; one row per `(kind, id)` holding the JSON body
pub struct SqliteContentStore {
    pool: SqlitePool,
}

impl SqliteContentStore {
    /// Open `url` (e.g. `sqlite://content.db?mode=rwc`) and ensure the schema
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new().max_connections(5).connect(url).await?;
        Self::new(pool).await
    }

    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS content (
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                name TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (kind, id)
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of stored rows of `kind`
    pub async fn count(&self, kind: ContentKind) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content WHERE kind = ?")
            .bind(kind.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }
}

#[async_trait]
impl ContentStorePort for SqliteContentStore {
    async fn find_by_id(
        &self,
        kind: ContentKind,
        id: &ContentId,
    ) -> Result<Option<ContentEntity>, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM content WHERE kind = ? AND id = ?")
                .bind(kind.as_str())
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        match row {
            Some((body,)) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, entity: &ContentEntity) -> Result<ContentEntity, StoreError> {
        let body = serde_json::to_string(entity)?;
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO content (kind, id, name, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entity.kind().as_str())
        .bind(entity.id().as_str())
        .bind(entity.name())
        .bind(&body)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(kind = %entity.kind(), id = %entity.id(), "Inserted content row");
                Ok(entity.clone())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Duplicate {
                    kind: entity.kind(),
                    id: entity.id().clone(),
                })
            }
            Err(e) => Err(db_error(e)),
        }
    }

    async fn update(&self, entity: &ContentEntity) -> Result<bool, StoreError> {
        let body = serde_json::to_string(entity)?;

        let result = sqlx::query(
            "UPDATE content SET name = ?, body = ?, updated_at = ? WHERE kind = ? AND id = ?",
        )
        .bind(entity.name())
        .bind(&body)
        .bind(Utc::now().to_rfc3339())
        .bind(entity.kind().as_str())
        .bind(entity.id().as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
