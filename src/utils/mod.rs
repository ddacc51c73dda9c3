//! Helpers shared by the service and HTTP layers.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Acceptance check for submitted URLs

pub mod code_generator;
pub mod url_validator;
