// events/types.rs
//
// Every event the subsystem emits. An event is a record of something that
// already happened, carrying just enough data for a subscriber to react;
// subscribers cannot influence the operation that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Common surface of every emitted event
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Identifier of this particular emission
    fn event_id(&self) -> Uuid;

    /// When the underlying fact occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Stable name used in the emission log
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a catalog refresh completes successfully
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Entries delivered by the remote listing
    pub fetched: usize,
    /// Distinct stored records those entries resolved to
    pub persisted: usize,
}

impl CatalogRefreshed {
    pub fn new(fetched: usize, persisted: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            fetched,
            persisted,
        }
    }
}

impl DomainEvent for CatalogRefreshed {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "CatalogRefreshed"
    }
}

// ============================================================================
// IMAGE EVENTS
// ============================================================================

/// Emitted when an image resolve delivers bytes to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub photo_id: String,
    /// true = served from cache, false = fetched from the remote host
    pub from_cache: bool,
    pub byte_len: usize,
}

impl ImageResolved {
    pub fn new(photo_id: String, from_cache: bool, byte_len: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            photo_id,
            from_cache,
            byte_len,
        }
    }
}

impl DomainEvent for ImageResolved {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ImageResolved"
    }
}

/// Emitted when a fire-and-forget cache disk write fails.
/// The in-memory entry is still live; only durability was lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCacheWriteFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub key: String,
}

impl ImageCacheWriteFailed {
    pub fn new(key: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            key,
        }
    }
}

impl DomainEvent for ImageCacheWriteFailed {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ImageCacheWriteFailed"
    }
}

// ============================================================================
// TAG EVENTS
// ============================================================================

/// Emitted when a tag is attached to a photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoTagged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub photo_id: String,
    pub tag: String,
}

impl PhotoTagged {
    pub fn new(photo_id: String, tag: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            photo_id,
            tag,
        }
    }
}

impl DomainEvent for PhotoTagged {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "PhotoTagged"
    }
}
