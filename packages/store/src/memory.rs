use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::key::StorageKey;
use crate::objects::StorageRef;
use crate::uploader::ObjectStore;

const DEFAULT_BASE_URL: &str = "memory://objects";

/// In-memory ObjectStore for testing and offline use.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    base_url: String,
    objects: Arc<Mutex<HashMap<StorageKey, Vec<u8>>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose URLs are `{base_url}/{key}`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: Arc::default(),
        }
    }

    /// Bytes currently stored under `key`.
    pub fn get(&self, key: &StorageKey) -> Option<Vec<u8>> {
        self.objects().get(key).cloned()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<StorageKey, Vec<u8>>> {
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryStore {
    async fn put(&self, key: &StorageKey, data: Vec<u8>) -> Result<StorageRef, StoreError> {
        let object = StorageRef::for_bytes(key.clone(), &data);
        self.objects().insert(key.clone(), data);
        Ok(object)
    }

    async fn url(&self, object: &StorageRef) -> Result<String, StoreError> {
        if !self.objects().contains_key(&object.key) {
            return Err(StoreError::NotFound(object.key.clone()));
        }
        Ok(format!("{}/{}", self.base_url, object.key))
    }
}
