// src/application/state.rs

use std::path::Path;
use std::sync::Arc;

use crate::db::{
    create_connection_pool, create_connection_pool_at, initialize_database, ConnectionPool,
};
use crate::error::PhotoResult;
use crate::events::EventBus;
use crate::infrastructure::{default_cache_dir, ImageCache};
use crate::integrations::{CatalogClient, FlickrClient};
use crate::repositories::{
    PhotoRepository, SqlitePhotoRepository, SqliteTagRepository, TagRepository,
};
use crate::services::{PhotoService, TagService};

/// Fully wired application state.
/// All fields are Arc-wrapped for thread-safe sharing across tasks.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub photo_service: Arc<PhotoService>,
    pub tag_service: Arc<TagService>,
}

impl AppState {
    /// Wire the whole subsystem against the platform-default database and
    /// cache locations.
    pub fn bootstrap() -> PhotoResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let pool = Arc::new(create_connection_pool()?);
        let image_cache = Arc::new(ImageCache::with_event_bus(
            default_cache_dir()?,
            Arc::clone(&event_bus),
        )?);
        let catalog_client: Arc<dyn CatalogClient> = Arc::new(FlickrClient::new());

        Self::assemble(event_bus, pool, image_cache, catalog_client)
    }

    /// Wire against explicit paths. Used by tests and by embedders that
    /// manage their own storage locations.
    pub fn bootstrap_at(db_path: &Path, cache_dir: &Path) -> PhotoResult<Self> {
        let event_bus = Arc::new(EventBus::new());
        let pool = Arc::new(create_connection_pool_at(db_path)?);
        let image_cache = Arc::new(ImageCache::with_event_bus(
            cache_dir.to_path_buf(),
            Arc::clone(&event_bus),
        )?);
        let catalog_client: Arc<dyn CatalogClient> = Arc::new(FlickrClient::new());

        Self::assemble(event_bus, pool, image_cache, catalog_client)
    }

    fn assemble(
        event_bus: Arc<EventBus>,
        pool: Arc<ConnectionPool>,
        image_cache: Arc<ImageCache>,
        catalog_client: Arc<dyn CatalogClient>,
    ) -> PhotoResult<Self> {
        // Initialize schema (idempotent)
        {
            let conn = pool.get()?;
            initialize_database(&conn)?;
        }

        // 2. REPOSITORIES
        // The type `Arc<dyn Trait>` matches the service constructor signatures.
        let photo_repo: Arc<dyn PhotoRepository> =
            Arc::new(SqlitePhotoRepository::new(Arc::clone(&pool)));
        let tag_repo: Arc<dyn TagRepository> =
            Arc::new(SqliteTagRepository::new(Arc::clone(&pool)));

        // 3. SERVICES
        let photo_service = Arc::new(PhotoService::new(
            catalog_client,
            Arc::clone(&photo_repo),
            image_cache,
            Arc::clone(&event_bus),
        ));
        let tag_service = Arc::new(TagService::new(
            tag_repo,
            photo_repo,
            Arc::clone(&event_bus),
        ));

        // 4. APPLICATION STATE
        Ok(Self {
            event_bus,
            photo_service,
            tag_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_at_wires_working_services() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::bootstrap_at(
            &dir.path().join("photos.db"),
            &dir.path().join("images"),
        )
        .unwrap();

        // Schema is in place and both services answer
        assert!(state.photo_service.list_photos().unwrap().is_empty());
        assert!(state.tag_service.list_all_tags().unwrap().is_empty());
        assert_eq!(state.event_bus.get_event_log().len(), 0);
    }
}
