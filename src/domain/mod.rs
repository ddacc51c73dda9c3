//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! Nothing in this layer knows about HTTP or a concrete database.
//! Orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
