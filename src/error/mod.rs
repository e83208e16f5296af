// src/error/mod.rs
//
// Crate error types

pub mod types;

pub use types::{PhotoError, PhotoResult};
