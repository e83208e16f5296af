use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents one remote photo's metadata as known to the local store
/// This is the root entity for all photo-related data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Stable remote identifier, unique within the store
    pub photo_id: String,

    /// Photo title as provided by the catalog
    pub title: String,

    /// When the photo was taken (catalog-provided, interpreted as UTC)
    pub taken_at: DateTime<Utc>,

    /// Resolved image URL, if the catalog entry carried enough to build one
    pub remote_url: Option<String>,
}

impl PhotoRecord {
    /// Create a new PhotoRecord from catalog-provided fields
    pub fn new(
        photo_id: String,
        title: String,
        taken_at: DateTime<Utc>,
        remote_url: Option<String>,
    ) -> Self {
        Self {
            photo_id,
            title,
            taken_at,
            remote_url,
        }
    }
}
