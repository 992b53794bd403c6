//! # noteful-core
//!
//! Core types, traits, and abstractions for the noteful backend.
//!
//! This crate provides the entity models, request types, repository traits,
//! and the error taxonomy that the database and API crates depend on.

pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{is_v7, new_v7, parse_id};
pub use validation::{reject_nul, require_non_empty, validate_reference_id};
