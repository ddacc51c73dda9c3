#![allow(dead_code)]

use axum::Router;
use shorturl::application::services::MappingService;
use shorturl::domain::entities::NewUrlMapping;
use shorturl::domain::repositories::{InsertOutcome, MappingRepository};
use shorturl::infrastructure::persistence::InMemoryMappingRepository;
use shorturl::routes::build_router;
use shorturl::state::AppState;
use std::sync::Arc;

pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = Arc::new(InMemoryMappingRepository::new());
    let service = MappingService::with_repository(repository.clone());

    (AppState::new(Arc::new(service)), repository)
}

pub fn create_test_app() -> (Router, Arc<InMemoryMappingRepository>) {
    let (state, repository) = create_test_state();
    (build_router(state), repository)
}

pub async fn create_test_mapping(repository: &InMemoryMappingRepository, url: &str, code: &str) {
    let outcome = repository
        .insert_if_absent(NewUrlMapping::new(url, code))
        .await
        .unwrap();

    assert!(matches!(outcome, InsertOutcome::Inserted(_)));
}
