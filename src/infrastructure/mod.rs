// src/infrastructure/mod.rs
//
// Filesystem-facing support code. Nothing in here knows about catalog
// semantics; the domain drives, infrastructure carries.

pub mod image_cache;

pub use image_cache::{default_cache_dir, ImageCache};
