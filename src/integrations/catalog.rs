// src/integrations/catalog.rs
//
// Transport seam for the remote photo catalog
//
// Services depend on this trait, never on a concrete client, so tests can
// substitute a deterministic stub for the network.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PhotoResult;

/// One catalog entry as delivered by the remote API, already decoded and
/// normalized: the date-taken string parsed, the image URL assembled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPhotoDto {
    pub photo_id: String,
    pub title: String,
    pub taken_at: DateTime<Utc>,
    pub remote_url: Option<String>,
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the catalog listing. One request per call, entries in
    /// server-provided order.
    async fn fetch_catalog(&self) -> PhotoResult<Vec<CatalogPhotoDto>>;

    /// Fetch raw image bytes from an already-resolved URL.
    async fn fetch_image(&self, url: &str) -> PhotoResult<Vec<u8>>;
}
