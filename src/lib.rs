// src/lib.rs
// PhotoHub - photo catalog fetch, store and cache subsystem
//
// A library crate, no binary: a UI embedder constructs an AppState and calls
// the services. Remote metadata lands in a local SQLite store, image bytes
// in a directory-backed cache, and everything observable goes out on the
// event bus.

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    normalized_tag_name,
    validate_photo,
    validate_tag_name,
    // Photo
    PhotoRecord,
    // Tag
    Tag,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{PhotoError, PhotoResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    // Catalog events
    CatalogRefreshed,
    DomainEvent,
    EventBus,
    EventLogEntry,
    // Image events
    ImageCacheWriteFailed,
    ImageResolved,
    // Tag events
    PhotoTagged,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    PhotoRepository,
    SqlitePhotoRepository,
    SqliteTagRepository,
    TagRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{default_cache_dir, ImageCache};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{PhotoService, TagService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CatalogClient, CatalogPhotoDto, FlickrClient};
