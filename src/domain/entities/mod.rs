//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`], plus [`NewUrlMapping`] as
//! the insert payload. Entities are plain data without persistence concerns.

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
