// src/infrastructure/image_cache.rs
//
// Disk-backed image cache
//
// CRITICAL RULES:
// - Keyed by photo_id; filename = cache key
// - The memory layer answers same-session lookups synchronously
// - Disk writes are fire-and-forget; a failed write is logged, never surfaced
// - No eviction, no size limit, no TTL

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{PhotoError, PhotoResult};
use crate::events::{EventBus, ImageCacheWriteFailed};

/// Default image cache directory: {cache_dir}/photohub/images
pub fn default_cache_dir() -> PhotoResult<PathBuf> {
    let base = dirs::cache_dir()
        .ok_or_else(|| PhotoError::Other("Could not determine cache directory".to_string()))?;

    Ok(base.join("photohub").join("images"))
}

/// Two-layer image cache: an in-memory map in front of one file per key.
///
/// INVARIANTS:
/// - get never touches the network
/// - set inserts into memory before returning, so a get that follows a set
///   in the same session always hits
/// - at most one entry per key; a second set overwrites (last write wins)
/// - entries live until remove is called; nothing expires them
pub struct ImageCache {
    cache_dir: PathBuf,
    memory: Mutex<HashMap<String, Vec<u8>>>,
    event_bus: Option<Arc<EventBus>>,
}

impl ImageCache {
    /// Create a cache rooted at the given directory, creating it if needed
    pub fn new(cache_dir: PathBuf) -> PhotoResult<Self> {
        fs::create_dir_all(&cache_dir)?;

        Ok(Self {
            cache_dir,
            memory: Mutex::new(HashMap::new()),
            event_bus: None,
        })
    }

    /// Create a cache at the platform-default location
    pub fn open_default() -> PhotoResult<Self> {
        Self::new(default_cache_dir()?)
    }

    /// Create a cache that reports failed background writes on the event bus
    pub fn with_event_bus(cache_dir: PathBuf, event_bus: Arc<EventBus>) -> PhotoResult<Self> {
        let mut cache = Self::new(cache_dir)?;
        cache.event_bus = Some(event_bus);
        Ok(cache)
    }

    /// Look up cached bytes: memory first, then the backing file.
    /// A disk hit warms the memory layer. Never touches the network.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(bytes) = self.memory.lock().unwrap().get(key) {
            return Some(bytes.clone());
        }

        let bytes = fs::read(self.file_path(key)).ok()?;
        self.memory
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.clone());

        Some(bytes)
    }

    /// Store bytes under a key. The memory insert completes before this
    /// returns; the disk write is best-effort and its failure is logged (and
    /// reported on the bus when one is attached), never surfaced.
    ///
    /// Inside a tokio runtime the write rides on a background task; a
    /// non-async embedder gets a plain blocking write instead.
    pub fn set(&self, key: &str, bytes: Vec<u8>) {
        self.memory
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.clone());

        let path = self.file_path(key);
        let event_bus = self.event_bus.clone();
        let key = key.to_string();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = tokio::fs::write(&path, &bytes).await {
                        Self::report_write_failure(&key, &e, event_bus.as_deref());
                    }
                });
            }
            Err(_) => {
                if let Err(e) = fs::write(&path, &bytes) {
                    Self::report_write_failure(&key, &e, event_bus.as_deref());
                }
            }
        }
    }

    fn report_write_failure(key: &str, err: &std::io::Error, event_bus: Option<&EventBus>) {
        log::warn!("Failed to persist cached image {}: {}", key, err);
        if let Some(bus) = event_bus {
            bus.emit(ImageCacheWriteFailed::new(key.to_string()));
        }
    }

    /// Drop the memory entry and delete the backing file
    pub fn remove(&self, key: &str) {
        self.memory.lock().unwrap().remove(key);

        let path = self.file_path(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to delete cached image {}: {}", key, e);
            }
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(key)
    }
}
