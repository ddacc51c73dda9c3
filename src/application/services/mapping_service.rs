//! Short link creation and resolution service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, looks_like_code};
use crate::utils::url_validator::is_valid_url;

/// Number of insert attempts before giving up on code generation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service for creating and resolving URL mappings.
///
/// Holds no locks and no mutable state: every consistency guarantee comes from
/// the repository's atomic [`MappingRepository::insert_if_absent`].
pub struct MappingService {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl MappingService {
    /// Creates a service with the given store and code generator.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a service using [`RandomCodeGenerator`] with default length.
    pub fn with_repository(repository: Arc<dyn MappingRepository>) -> Self {
        Self::new(repository, Arc::new(RandomCodeGenerator::default()))
    }

    /// Overrides the bounded retry count. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns the mapping for `original_url`, creating it on first submission.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL
    /// 2. Return the existing mapping if the URL was already shortened
    /// 3. Otherwise generate a code and insert atomically, retrying with a
    ///    fresh code on conflict up to `max_attempts` times
    ///
    /// A conflict may also mean a concurrent request stored the same URL first;
    /// in that case its mapping is returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is not an absolute http(s) URL
    /// - [`AppError::GenerationExhausted`] if every attempt conflicted
    /// - [`AppError::Persistence`] if the store fails
    pub async fn create_or_get(&self, original_url: &str) -> Result<UrlMapping, AppError> {
        if !is_valid_url(original_url) {
            debug!(url = original_url, "Rejected invalid URL");
            return Err(AppError::InvalidUrl);
        }

        if let Some(existing) = self.repository.find_by_original_url(original_url).await? {
            debug!(code = %existing.short_code, "Returning existing mapping");
            return Ok(existing);
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            match self
                .repository
                .insert_if_absent(NewUrlMapping::new(original_url, code.clone()))
                .await?
            {
                InsertOutcome::Inserted(mapping) => {
                    info!(code = %mapping.short_code, url = %mapping.original_url, "Created short URL");
                    return Ok(mapping);
                }
                InsertOutcome::Conflict => {
                    if let Some(existing) =
                        self.repository.find_by_original_url(original_url).await?
                    {
                        debug!(code = %existing.short_code, "URL stored by a concurrent request");
                        return Ok(existing);
                    }

                    warn!(attempt, code = %code, "Short code collision, retrying");
                }
            }
        }

        Err(AppError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no mapping has this code
    /// - [`AppError::Persistence`] if the store fails
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        if !looks_like_code(short_code) {
            return Err(AppError::not_found(short_code));
        }

        self.repository
            .find_by_short_code(short_code)
            .await?
            .map(|mapping| mapping.original_url)
            .ok_or_else(|| AppError::not_found(short_code))
    }

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store fails.
    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repository.count().await?)
    }

    /// Checks that the underlying store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store cannot be reached.
    pub async fn health_check(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::error::PersistenceError;
    use crate::utils::code_generator::MockCodeGenerator;
    use chrono::Utc;
    use std::time::Duration;

    const URL: &str = "https://www.freecodecamp.org";

    fn create_test_mapping(id: i64, url: &str, code: &str) -> UrlMapping {
        UrlMapping::new(id, url.to_string(), code.to_string(), Utc::now())
    }

    fn fixed_generator(codes: &[&str]) -> MockCodeGenerator {
        let mut codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        codes.reverse();

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .returning(move || codes.pop().unwrap_or_else(|| "fallback1".to_string()));
        generator
    }

    fn service(repo: MockMappingRepository, generator: MockCodeGenerator) -> MappingService {
        MappingService::new(Arc::new(repo), Arc::new(generator))
    }

    #[tokio::test]
    async fn test_create_new_mapping() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_if_absent()
            .withf(|new_mapping| {
                new_mapping.original_url == URL && new_mapping.short_code == "abc1234"
            })
            .times(1)
            .returning(|new_mapping| {
                Ok(InsertOutcome::Inserted(create_test_mapping(
                    1,
                    &new_mapping.original_url,
                    &new_mapping.short_code,
                )))
            });

        let service = service(mock_repo, fixed_generator(&["abc1234"]));

        let mapping = service.create_or_get(URL).await.unwrap();

        assert_eq!(mapping.original_url, URL);
        assert_eq!(mapping.short_code, "abc1234");
    }

    #[tokio::test]
    async fn test_create_returns_existing_mapping() {
        let mut mock_repo = MockMappingRepository::new();

        let existing = create_test_mapping(5, URL, "existing");
        mock_repo
            .expect_find_by_original_url()
            .withf(|url| url == URL)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_insert_if_absent().times(0);

        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);

        let service = service(mock_repo, generator);

        let mapping = service.create_or_get(URL).await.unwrap();

        assert_eq!(mapping.id, 5);
        assert_eq!(mapping.short_code, "existing");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url_without_store_access() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_find_by_original_url().times(0);
        mock_repo.expect_insert_if_absent().times(0);

        let service = service(mock_repo, MockCodeGenerator::new());

        for candidate in ["not a url", "", "ftp:/bad", "/relative/path"] {
            let result = service.create_or_get(candidate).await;
            assert!(
                matches!(result, Err(AppError::InvalidUrl)),
                "{candidate:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_retries_on_code_conflict() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .times(3)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_if_absent()
            .withf(|new_mapping| new_mapping.short_code != "fresh12")
            .times(2)
            .returning(|_| Ok(InsertOutcome::Conflict));

        mock_repo
            .expect_insert_if_absent()
            .withf(|new_mapping| new_mapping.short_code == "fresh12")
            .times(1)
            .returning(|new_mapping| {
                Ok(InsertOutcome::Inserted(create_test_mapping(
                    2,
                    &new_mapping.original_url,
                    &new_mapping.short_code,
                )))
            });

        let service = service(
            mock_repo,
            fixed_generator(&["taken01", "taken02", "fresh12"]),
        );

        let mapping = service.create_or_get(URL).await.unwrap();

        assert_eq!(mapping.short_code, "fresh12");
    }

    #[tokio::test]
    async fn test_create_fails_after_max_attempts() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_if_absent()
            .times(3)
            .returning(|_| Ok(InsertOutcome::Conflict));

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(3)
            .returning(|| "samecode".to_string());

        let service = service(mock_repo, generator).with_max_attempts(3);

        let result = service.create_or_get(URL).await;

        assert!(matches!(
            result,
            Err(AppError::GenerationExhausted { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_create_returns_mapping_stored_by_concurrent_request() {
        let mut mock_repo = MockMappingRepository::new();

        let winner = create_test_mapping(9, URL, "winner1");
        let mut lookups = 0;
        mock_repo
            .expect_find_by_original_url()
            .times(2)
            .returning(move |_| {
                lookups += 1;
                if lookups == 1 {
                    Ok(None)
                } else {
                    Ok(Some(winner.clone()))
                }
            });

        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(InsertOutcome::Conflict));

        let service = service(mock_repo, fixed_generator(&["loser12"]));

        let mapping = service.create_or_get(URL).await.unwrap();

        assert_eq!(mapping.short_code, "winner1");
    }

    #[tokio::test]
    async fn test_create_propagates_persistence_error() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .returning(|_| Err(PersistenceError::Timeout(Duration::from_secs(5))));

        mock_repo.expect_insert_if_absent().times(0);

        let service = service(mock_repo, MockCodeGenerator::new());

        let result = service.create_or_get(URL).await;

        assert!(matches!(
            result,
            Err(AppError::Persistence(PersistenceError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn test_resolve_existing_code() {
        let mut mock_repo = MockMappingRepository::new();

        let mapping = create_test_mapping(1, URL, "abc1234");
        mock_repo
            .expect_find_by_short_code()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));

        let service = service(mock_repo, MockCodeGenerator::new());

        assert_eq!(service.resolve("abc1234").await.unwrap(), URL);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_short_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(mock_repo, MockCodeGenerator::new());

        let result = service.resolve("doesnotexist").await;

        assert!(matches!(result, Err(AppError::NotFound { code }) if code == "doesnotexist"));
    }

    #[tokio::test]
    async fn test_resolve_impossible_code_skips_store() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_find_by_short_code().times(0);

        let service = service(mock_repo, MockCodeGenerator::new());

        assert!(matches!(
            service.resolve("no").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.resolve("has space in it").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_propagates_persistence_error() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_short_code()
            .times(1)
            .returning(|_| Err(PersistenceError::Timeout(Duration::from_secs(5))));

        let service = service(mock_repo, MockCodeGenerator::new());

        assert!(matches!(
            service.resolve("abc1234").await,
            Err(AppError::Persistence(_))
        ));
    }
}
