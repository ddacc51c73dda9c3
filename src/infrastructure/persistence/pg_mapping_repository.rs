//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::PersistenceError;

/// Upper bound for a single store round-trip unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Row shape of the `urls` table.
#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    short_url: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.id, row.original_url, row.short_url, row.created_at)
    }
}

/// PostgreSQL repository for URL mappings.
///
/// `short_url` carries a UNIQUE constraint and `original_url` a unique index
/// on its md5 digest, so `INSERT ... ON CONFLICT DO NOTHING` gives an atomic
/// insert-if-absent for URLs of any length.
/// Every query is bounded by `timeout`; an elapsed timeout surfaces as
/// [`PersistenceError::Timeout`].
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgMappingRepository {
    /// Creates a new repository with the default store timeout.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    /// Creates a new repository with a custom per-query timeout.
    pub fn with_timeout(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, PersistenceError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| PersistenceError::Timeout(self.timeout))?
            .map_err(PersistenceError::from)
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, PersistenceError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    SELECT id, original_url, short_url, created_at
                    FROM urls
                    WHERE md5(original_url) = md5($1) AND original_url = $1
                    ORDER BY created_at, id
                    LIMIT 1
                    "#,
                )
                .bind(original_url)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, PersistenceError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    SELECT id, original_url, short_url, created_at
                    FROM urls
                    WHERE short_url = $1
                    "#,
                )
                .bind(short_code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn insert_if_absent(
        &self,
        new_mapping: NewUrlMapping,
    ) -> Result<InsertOutcome, PersistenceError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    INSERT INTO urls (original_url, short_url)
                    VALUES ($1, $2)
                    ON CONFLICT DO NOTHING
                    RETURNING id, original_url, short_url, created_at
                    "#,
                )
                .bind(&new_mapping.original_url)
                .bind(&new_mapping.short_code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(match row {
            Some(row) => InsertOutcome::Inserted(row.into()),
            None => InsertOutcome::Conflict,
        })
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        self.bounded(sqlx::query("SELECT 1").execute(self.pool.as_ref()))
            .await
            .map(|_| ())
    }
}
