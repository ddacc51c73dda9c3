//! Data Transfer Objects for API requests and responses.
//!
//! DTOs use Serde for JSON serialization and validator for input validation.

pub mod health;
pub mod hello;
pub mod shorten;
