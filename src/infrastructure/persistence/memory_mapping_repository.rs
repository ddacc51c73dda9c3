//! In-process implementation of the mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::PersistenceError;

#[derive(Default)]
struct Tables {
    by_code: HashMap<String, UrlMapping>,
    code_by_url: HashMap<String, String>,
    next_id: i64,
}

/// Mapping store held in process memory.
///
/// Enforces the same uniqueness rules as the PostgreSQL schema (unique short
/// code, unique original URL) under a single write lock. Contents are lost on
/// restart.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    tables: RwLock<Tables>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, PersistenceError> {
        let tables = self.tables.read().await;

        Ok(tables
            .code_by_url
            .get(original_url)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, PersistenceError> {
        Ok(self.tables.read().await.by_code.get(short_code).cloned())
    }

    async fn insert_if_absent(
        &self,
        new_mapping: NewUrlMapping,
    ) -> Result<InsertOutcome, PersistenceError> {
        let mut tables = self.tables.write().await;

        if tables.by_code.contains_key(&new_mapping.short_code)
            || tables.code_by_url.contains_key(&new_mapping.original_url)
        {
            return Ok(InsertOutcome::Conflict);
        }

        tables.next_id += 1;
        let mapping = UrlMapping::new(
            tables.next_id,
            new_mapping.original_url,
            new_mapping.short_code,
            Utc::now(),
        );

        tables
            .code_by_url
            .insert(mapping.original_url.clone(), mapping.short_code.clone());
        tables
            .by_code
            .insert(mapping.short_code.clone(), mapping.clone());

        Ok(InsertOutcome::Inserted(mapping))
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        Ok(self.tables.read().await.by_code.len() as i64)
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        Ok(())
    }
}
