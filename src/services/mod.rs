// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod photo_service;
pub mod tag_service;

#[cfg(test)]
mod tag_service_tests;

// Re-export all services
pub use photo_service::PhotoService;
pub use tag_service::TagService;
