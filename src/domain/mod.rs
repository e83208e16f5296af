// src/domain/mod.rs
//
// Domain root. Entities and their invariant validators live here; every
// other layer imports them through `crate::domain::*`.

pub mod photo;
pub mod tag;

pub use photo::{validate_photo, PhotoRecord};
pub use tag::{normalized_tag_name, validate_tag_name, Tag};

use thiserror::Error;

/// A business rule or invariant was violated
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
