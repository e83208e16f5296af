// src/repositories/mod.rs
//
// Persistence layer: plain SQL mappers between rows and domain entities.
// Invariant enforcement and event emission belong to the services above;
// repositories only read and write.

pub mod photo_repository;
pub mod tag_repository;

pub use photo_repository::{PhotoRepository, SqlitePhotoRepository};
pub use tag_repository::{SqliteTagRepository, TagRepository};
