//! # Uploader: the single-attempt upload path over an abstract object store
//!
//! [`ObjectStore`] is the seam to whatever actually holds the bytes: an in-memory map
//! ([`crate::MemoryStore`]), the local filesystem ([`crate::FileStore`]), or a hosted
//! bucket. It exposes exactly two operations, "store bytes under a key" and
//! "resolve a public URL for a stored object".
//!
//! [`Uploader`] wraps a store with the sequencing every caller needs:
//!
//! 1. [`store`](Uploader::store) the bytes, yielding a [`StorageRef`];
//! 2. [`resolve_url`](Uploader::resolve_url) for that reference.
//!
//! [`upload`](Uploader::upload) runs both in order. There is no retry and no
//! chunking: each stage is attempted once and the first failure is returned as an
//! [`UploadError`] tagged with the stage and key. Writing twice to the same key
//! replaces the earlier object.

use std::future::Future;

use crate::error::{StoreError, UploadError, UploadStage};
use crate::key::StorageKey;
use crate::objects::StorageRef;

/// Async interface to an object storage backend.
pub trait ObjectStore {
    fn put(
        &self,
        key: &StorageKey,
        data: Vec<u8>,
    ) -> impl Future<Output = Result<StorageRef, StoreError>>;
    fn url(&self, object: &StorageRef) -> impl Future<Output = Result<String, StoreError>>;
}

/// Uploads binary assets and resolves their public URLs.
#[derive(Clone, Debug)]
pub struct Uploader<S: ObjectStore> {
    store: S,
}

impl<S: ObjectStore> Uploader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Store `data` under `key`.
    pub async fn store(&self, key: &StorageKey, data: Vec<u8>) -> Result<StorageRef, UploadError> {
        let size = data.len();
        match self.store.put(key, data).await {
            Ok(object) => {
                tracing::debug!(%key, size, etag = %object.etag, "stored object");
                Ok(object)
            }
            Err(source) => Err(UploadError {
                stage: UploadStage::Store,
                key: key.clone(),
                source,
            }),
        }
    }

    /// Resolve the public URL of a stored object.
    pub async fn resolve_url(&self, object: &StorageRef) -> Result<String, UploadError> {
        self.store.url(object).await.map_err(|source| UploadError {
            stage: UploadStage::ResolveUrl,
            key: object.key.clone(),
            source,
        })
    }

    /// Store `data` under `key`, then resolve its URL.
    pub async fn upload(&self, key: &StorageKey, data: Vec<u8>) -> Result<String, UploadError> {
        let object = self.store(key, data).await?;
        let url = self.resolve_url(&object).await?;
        tracing::info!(%key, %url, "upload complete");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::cell::Cell;

    /// Store that accepts writes but cannot hand out URLs.
    struct NoUrlStore {
        puts: Cell<usize>,
    }

    impl ObjectStore for NoUrlStore {
        async fn put(&self, key: &StorageKey, data: Vec<u8>) -> Result<StorageRef, StoreError> {
            self.puts.set(self.puts.get() + 1);
            Ok(StorageRef::for_bytes(key.clone(), &data))
        }

        async fn url(&self, _object: &StorageRef) -> Result<String, StoreError> {
            Err(StoreError::Unavailable("signing service down".to_string()))
        }
    }

    /// Store that rejects every write.
    struct ReadOnlyStore;

    impl ObjectStore for ReadOnlyStore {
        async fn put(&self, _key: &StorageKey, _data: Vec<u8>) -> Result<StorageRef, StoreError> {
            Err(StoreError::Unavailable("bucket is read-only".to_string()))
        }

        async fn url(&self, _object: &StorageRef) -> Result<String, StoreError> {
            unreachable!("url must not be requested after a failed put")
        }
    }

    #[tokio::test]
    async fn test_upload_returns_resolved_url() {
        let uploader = Uploader::new(MemoryStore::new());
        let key = StorageKey::profile("u1").unwrap();

        let url = uploader.upload(&key, b"img".to_vec()).await.unwrap();

        assert_eq!(url, "memory://objects/images/profile/u1");
        assert_eq!(uploader.inner().get(&key), Some(b"img".to_vec()));
    }

    #[tokio::test]
    async fn test_store_failure_skips_url_resolution() {
        let uploader = Uploader::new(ReadOnlyStore);
        let key = StorageKey::profile("u1").unwrap();

        let err = uploader.upload(&key, b"img".to_vec()).await.unwrap_err();

        assert_eq!(err.stage, UploadStage::Store);
        assert_eq!(err.key, key);
    }

    #[tokio::test]
    async fn test_url_failure_is_single_attempt() {
        let uploader = Uploader::new(NoUrlStore { puts: Cell::new(0) });
        let key = StorageKey::diary("u1", "a1").unwrap();

        let err = uploader.upload(&key, b"img".to_vec()).await.unwrap_err();

        assert_eq!(err.stage, UploadStage::ResolveUrl);
        assert_eq!(uploader.inner().puts.get(), 1);
        assert!(err.to_string().contains("images/diary/u1/a1"));
    }
}
