// src/integrations/flickr/client.rs
//
// Flickr REST API Integration
//
// ARCHITECTURE:
// - JSON client for the fixed interestingness listing
// - Maps external payloads → internal DTOs (NO domain mutation)
// - Used by PhotoService through the CatalogClient trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly
// - Returns DTOs that services can map
// - Surfaces failures verbatim: no retries, no masking

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

use crate::error::{PhotoError, PhotoResult};
use crate::integrations::catalog::{CatalogClient, CatalogPhotoDto};

/// Key for the public read-only catalog endpoint. Embedded on purpose; the
/// listing is public data and the key grants no account access.
const API_KEY: &str = "a6d819499131071f158fd740860a5a88";

const DEFAULT_BASE_URL: &str = "https://api.flickr.com/services/rest";

/// Format of the payload's date-taken strings, interpreted as UTC
const DATE_TAKEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Top-level envelope: `photos` is absent when `stat` is not "ok"
#[derive(Debug, Deserialize)]
struct ListingEnvelope {
    photos: Option<PhotosPage>,
    stat: String,
    code: Option<i64>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotosPage {
    photo: Vec<WirePhoto>,
}

#[derive(Debug, Deserialize)]
struct WirePhoto {
    id: String,
    title: String,
    #[serde(rename = "datetaken", deserialize_with = "deserialize_date_taken")]
    taken_at: DateTime<Utc>,
    farm: Option<i64>,
    server: Option<String>,
    secret: Option<String>,
}

/// Parse the payload's "YYYY-MM-DD HH:MM:SS" date inside deserialization, so
/// a malformed date fails the decode like any other shape mismatch
fn deserialize_date_taken<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, DATE_TAKEN_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

// ============================================================================
// CLIENT
// ============================================================================

/// Flickr API client for the fixed interestingness listing
pub struct FlickrClient {
    base_url: String,
    http_client: Client,
}

impl FlickrClient {
    /// Create a client against the production endpoint
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client,
        }
    }

    /// Create a client against a different endpoint (tests, embedders)
    pub fn with_base_url(base_url: String) -> Self {
        let mut client = Self::new();
        client.base_url = base_url;
        client
    }

    /// The one fixed catalog URL this client ever fetches
    fn interestingness_url(&self) -> String {
        format!(
            "{}?method=flickr.interestingness.getList&api_key={}&extras=date_taken&format=json&nojsoncallback=1",
            self.base_url, API_KEY
        )
    }

    /// Decode a catalog response body into DTOs, in server-provided order.
    ///
    /// A blank body and a well-formed envelope whose stat is not "ok" both
    /// map to EmptyResponse; a body that does not match the expected shape
    /// maps to Decode.
    pub fn parse_catalog_body(body: &str) -> PhotoResult<Vec<CatalogPhotoDto>> {
        if body.trim().is_empty() {
            return Err(PhotoError::EmptyResponse);
        }

        let envelope: ListingEnvelope = serde_json::from_str(body)?;

        if envelope.stat != "ok" {
            log::warn!(
                "Catalog listing refused: stat={} code={:?} message={:?}",
                envelope.stat,
                envelope.code,
                envelope.message
            );
            return Err(PhotoError::EmptyResponse);
        }

        let page = envelope.photos.ok_or(PhotoError::EmptyResponse)?;

        Ok(page.photo.into_iter().map(Self::map_wire_to_dto).collect())
    }

    /// Map one wire photo to the internal DTO
    fn map_wire_to_dto(photo: WirePhoto) -> CatalogPhotoDto {
        let remote_url = Self::assemble_image_url(&photo);

        CatalogPhotoDto {
            photo_id: photo.id,
            title: photo.title,
            taken_at: photo.taken_at,
            remote_url,
        }
    }

    /// Build the image URL from the payload's farm/server/id/secret fields.
    /// The payload never carries a literal URL; absent fields mean the record
    /// simply has no resolvable image.
    fn assemble_image_url(photo: &WirePhoto) -> Option<String> {
        let farm = photo.farm?;
        let server = photo.server.as_deref()?;
        let secret = photo.secret.as_deref()?;

        Some(format!(
            "https://farm{}.staticflickr.com/{}/{}_{}.jpg",
            farm, server, photo.id, secret
        ))
    }
}

#[async_trait]
impl CatalogClient for FlickrClient {
    async fn fetch_catalog(&self) -> PhotoResult<Vec<CatalogPhotoDto>> {
        let url = self.interestingness_url();
        log::debug!("Fetching catalog listing");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;

        Self::parse_catalog_body(&body)
    }

    async fn fetch_image(&self, url: &str) -> PhotoResult<Vec<u8>> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Err(PhotoError::EmptyResponse);
        }

        Ok(bytes.to_vec())
    }
}

impl Default for FlickrClient {
    fn default() -> Self {
        Self::new()
    }
}
