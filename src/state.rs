//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::MappingService;

/// State shared by all request handlers.
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
}

impl AppState {
    pub fn new(mapping_service: Arc<MappingService>) -> Self {
        Self { mapping_service }
    }
}
