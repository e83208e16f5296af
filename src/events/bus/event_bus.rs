// events/bus/event_bus.rs
//
// Synchronous in-process event bus.
//
// Handlers run inline on the emitting thread, in the order they were
// subscribed. Every emission is appended to an inspectable log, which is
// what the UI collaborator (and the test suite) observes. A panicking
// handler is isolated; the remaining handlers still run.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Handlers are stored type-erased and downcast back to the concrete
/// event type at dispatch
type BoxedHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// One recorded emission
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

/// Dispatch point for all crate events.
///
/// Services emit; embedders subscribe. Neither side depends on the other.
/// Cloning yields a second handle to the same subscriptions and log.
pub struct EventBus {
    subscriptions: Arc<RwLock<HashMap<TypeId, Vec<BoxedHandler>>>>,
    emission_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
            emission_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a handler for one event type. Handlers for the same type
    /// fire in registration order and are never unregistered.
    ///
    /// ```ignore
    /// bus.subscribe::<CatalogRefreshed, _>(|event| {
    ///     log::info!("{} records in the catalog", event.persisted);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: BoxedHandler = Box::new(move |any: &dyn Any| {
            match any.downcast_ref::<E>() {
                Some(event) => handler(event),
                // Unreachable as long as dispatch keys stay TypeId-accurate
                None => log::error!(
                    "Event handler for {} received a foreign payload",
                    std::any::type_name::<E>()
                ),
            }
        });

        self.subscriptions
            .write()
            .unwrap()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    /// Deliver an event to every handler subscribed to its type, then
    /// record the emission. Returns once all handlers have run.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let subscriptions = self.subscriptions.read().unwrap();
        let handlers = subscriptions
            .get(&TypeId::of::<E>())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for (idx, handler) in handlers.iter().enumerate() {
            // One broken subscriber must not starve the rest
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any)
            }));
            if let Err(cause) = outcome {
                log::warn!(
                    "Handler {} for {} panicked: {:?}",
                    idx,
                    event.event_type(),
                    cause
                );
            }
        }

        let entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: handlers.len(),
        };
        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            entry.event_type,
            entry.event_id,
            entry.handler_count
        );
        self.emission_log.write().unwrap().push(entry);
    }

    /// Snapshot of every emission so far, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.emission_log.read().unwrap().clone()
    }

    pub fn clear_event_log(&self) {
        self.emission_log.write().unwrap().clear();
    }

    /// How many handlers are registered for an event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        self.subscriptions
            .read()
            .unwrap()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            subscriptions: Arc::clone(&self.subscriptions),
            emission_log: Arc::clone(&self.emission_log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        bus.subscribe::<CatalogRefreshed, _>(move |_event| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(CatalogRefreshed::new(100, 87));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_receives_event_payload() {
        let bus = EventBus::new();
        let seen_key = Arc::new(RwLock::new(String::new()));

        let seen = Arc::clone(&seen_key);
        bus.subscribe::<ImageResolved, _>(move |event| {
            *seen.write().unwrap() = event.photo_id.clone();
        });

        bus.emit(ImageResolved::new("p42".to_string(), true, 2048));

        assert_eq!(*seen_key.read().unwrap(), "p42");
    }

    #[test]
    fn test_multiple_handlers_execute_in_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(RwLock::new(Vec::new()));

        for n in 1..=3 {
            let seq = Arc::clone(&sequence);
            bus.subscribe::<PhotoTagged, _>(move |_| {
                seq.write().unwrap().push(n);
            });
        }

        bus.emit(PhotoTagged::new("p1".to_string(), "beach".to_string()));

        assert_eq!(*sequence.read().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_event_log_records_emissions() {
        let bus = EventBus::new();

        bus.emit(CatalogRefreshed::new(10, 10));
        bus.emit(ImageResolved::new("p1".to_string(), false, 512));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "CatalogRefreshed");
        assert_eq!(log[1].event_type, "ImageResolved");

        bus.clear_event_log();
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_subscriber_count() {
        let bus = EventBus::new();

        assert_eq!(bus.subscriber_count::<CatalogRefreshed>(), 0);

        bus.subscribe::<CatalogRefreshed, _>(|_| {});
        assert_eq!(bus.subscriber_count::<CatalogRefreshed>(), 1);

        bus.subscribe::<CatalogRefreshed, _>(|_| {});
        assert_eq!(bus.subscriber_count::<CatalogRefreshed>(), 2);

        assert_eq!(bus.subscriber_count::<ImageResolved>(), 0);
    }

    #[test]
    fn test_handler_panic_doesnt_break_bus() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<CatalogRefreshed, _>(|_| {
            panic!("Intentional panic");
        });

        let counter_clone = Arc::clone(&counter);
        bus.subscribe::<CatalogRefreshed, _>(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(CatalogRefreshed::new(1, 1));

        // The second handler ran despite the first one panicking
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        // And the emission was still logged
        assert_eq!(bus.get_event_log().len(), 1);
    }
}
