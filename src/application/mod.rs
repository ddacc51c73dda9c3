//! Application layer services implementing business logic.
//!
//! Services orchestrate validation, code generation and repository calls, and
//! expose a small API to the HTTP handlers and the admin CLI.
//!
//! - [`services::mapping_service::MappingService`] - Short URL creation and resolution

pub mod services;
