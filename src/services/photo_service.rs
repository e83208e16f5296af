// src/services/photo_service.rs
//
// Photo catalog orchestration: remote fetch, dedup into the store, image
// resolution through the cache.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{validate_photo, PhotoRecord};
use crate::error::{PhotoError, PhotoResult};
use crate::events::{CatalogRefreshed, EventBus, ImageResolved};
use crate::infrastructure::ImageCache;
use crate::integrations::{CatalogClient, CatalogPhotoDto};
use crate::repositories::PhotoRepository;

/// Stateless coordinator over the catalog client, the record store and the
/// image cache. Constructed once at startup and shared by reference.
pub struct PhotoService {
    catalog_client: Arc<dyn CatalogClient>,
    photo_repo: Arc<dyn PhotoRepository>,
    image_cache: Arc<ImageCache>,
    event_bus: Arc<EventBus>,
}

impl PhotoService {
    pub fn new(
        catalog_client: Arc<dyn CatalogClient>,
        photo_repo: Arc<dyn PhotoRepository>,
        image_cache: Arc<ImageCache>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            catalog_client,
            photo_repo,
            image_cache,
            event_bus,
        }
    }

    /// Fetch the remote catalog and fold it into the store.
    ///
    /// Already-stored ids keep their stored field values; new ids are
    /// inserted; the whole batch lands atomically. The returned records are
    /// re-read from the store, so callers always see the persisted identity
    /// of each entry. Client failures propagate unchanged.
    pub async fn refresh_catalog(&self) -> PhotoResult<Vec<PhotoRecord>> {
        let dtos = self.catalog_client.fetch_catalog().await?;
        let fetched = dtos.len();

        let incoming: Vec<PhotoRecord> = dtos.into_iter().map(Self::dto_to_record).collect();
        let persisted = self.photo_repo.upsert_batch(&incoming)?;

        let distinct: HashSet<&str> = persisted.iter().map(|p| p.photo_id.as_str()).collect();
        log::info!(
            "Catalog refreshed: {} fetched, {} distinct records",
            fetched,
            distinct.len()
        );
        self.event_bus
            .emit(CatalogRefreshed::new(fetched, distinct.len()));

        Ok(persisted)
    }

    /// Resolve the image bytes for a record: cache first, then one remote
    /// fetch. A fetched image is placed in the cache before the bytes are
    /// returned, so an immediate second resolve for the same id stays local.
    pub async fn resolve_image(&self, photo: &PhotoRecord) -> PhotoResult<Vec<u8>> {
        // Reject malformed records before touching cache or network
        validate_photo(photo).map_err(PhotoError::Domain)?;

        if let Some(bytes) = self.image_cache.get(&photo.photo_id) {
            self.event_bus
                .emit(ImageResolved::new(photo.photo_id.clone(), true, bytes.len()));
            return Ok(bytes);
        }

        let url = photo
            .remote_url
            .as_deref()
            .ok_or_else(|| PhotoError::MissingImageUrl {
                photo_id: photo.photo_id.clone(),
            })?;

        let bytes = self.catalog_client.fetch_image(url).await?;

        // A payload that does not decode as an image is an error, not a
        // cache entry
        image::load_from_memory(&bytes)?;

        self.image_cache.set(&photo.photo_id, bytes.clone());

        log::debug!(
            "Image {} fetched and cached ({} bytes)",
            photo.photo_id,
            bytes.len()
        );
        self.event_bus
            .emit(ImageResolved::new(photo.photo_id.clone(), false, bytes.len()));

        Ok(bytes)
    }

    /// Snapshot read of every stored record, taken-date ascending
    pub fn list_photos(&self) -> PhotoResult<Vec<PhotoRecord>> {
        self.photo_repo.list_all()
    }

    fn dto_to_record(dto: CatalogPhotoDto) -> PhotoRecord {
        PhotoRecord {
            photo_id: dto.photo_id,
            title: dto.title,
            taken_at: dto.taken_at,
            remote_url: dto.remote_url,
        }
    }
}
