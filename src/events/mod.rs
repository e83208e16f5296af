// src/events/mod.rs
//
// In-process event system. Only event types and the bus are public; the
// type-erased handler representation stays internal.

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Catalog
    CatalogRefreshed,
    // Image
    ImageCacheWriteFailed,
    ImageResolved,
    // Tag
    PhotoTagged,
};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
