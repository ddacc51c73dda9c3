//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::PersistenceError;
use async_trait::async_trait;

/// Result of an atomic conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The mapping was stored and is now visible to other callers.
    Inserted(UrlMapping),
    /// A uniqueness constraint was already claimed by another mapping.
    Conflict,
}

/// Repository interface for URL mappings.
///
/// The store is the only shared state in the service; all consistency
/// guarantees come from [`MappingRepository::insert_if_absent`]. No update or
/// delete operation exists.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds the earliest mapping created for `original_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] on timeouts or database errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, PersistenceError>;

    /// Finds a mapping by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] on timeouts or database errors.
    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, PersistenceError>;

    /// Atomically inserts `new_mapping` unless its short code (or original URL)
    /// is already taken.
    ///
    /// Never overwrites an existing mapping. A concurrent claim yields
    /// [`InsertOutcome::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] on timeouts or database errors.
    async fn insert_if_absent(
        &self,
        new_mapping: NewUrlMapping,
    ) -> Result<InsertOutcome, PersistenceError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] on timeouts or database errors.
    async fn count(&self) -> Result<i64, PersistenceError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), PersistenceError>;
}
