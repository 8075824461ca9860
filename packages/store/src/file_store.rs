//! # Filesystem-backed object store
//!
//! [`FileStore`] is an [`ObjectStore`] implementation that writes each object to a
//! file whose relative path is the storage key. It backs local development and
//! self-hosted deployments where a static file server publishes the root directory.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! └── images/
//!     ├── profile/<user_id>
//!     └── diary/<user_id>/<asset_id>
//! ```
//!
//! ## URLs
//!
//! With a configured public base (e.g. `https://static.example.com`), the URL of a
//! key is `{public_url}/{key}`. Without one, a `file://` URL to the absolute path is
//! returned.

use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::StoreError;
use crate::key::StorageKey;
use crate::objects::StorageRef;
use crate::uploader::ObjectStore;

/// Filesystem-backed ObjectStore.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
    public_url: Option<String>,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            public_url: None,
        }
    }

    /// Builder method to publish objects under a base URL.
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        let url = url.trim_end_matches('/');
        self.public_url = (!url.is_empty()).then(|| url.to_string());
        self
    }

    /// Create a store from the `[storage]` config section.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.root.clone()).with_public_url(config.public_url.as_str())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &StorageKey) -> PathBuf {
        key.segments()
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl ObjectStore for FileStore {
    async fn put(&self, key: &StorageKey, data: Vec<u8>) -> Result<StorageRef, StoreError> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &data)?;
        Ok(StorageRef::for_bytes(key.clone(), &data))
    }

    async fn url(&self, object: &StorageRef) -> Result<String, StoreError> {
        let path = self.object_path(&object.key);
        if !path.is_file() {
            return Err(StoreError::NotFound(object.key.clone()));
        }
        match &self.public_url {
            Some(base) => Ok(format!("{base}/{}", object.key)),
            None => {
                let absolute = std::fs::canonicalize(&path)?;
                Ok(format!("file://{}", absolute.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploader::Uploader;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).with_public_url("https://static.test/");
        let key = StorageKey::profile("u1").unwrap();

        let object = store.put(&key, b"avatar".to_vec()).await.unwrap();

        let on_disk = std::fs::read(dir.path().join("images/profile/u1")).unwrap();
        assert_eq!(on_disk, b"avatar");
        assert_eq!(
            store.url(&object).await.unwrap(),
            "https://static.test/images/profile/u1"
        );
    }

    #[tokio::test]
    async fn test_file_url_without_public_base() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = Uploader::new(FileStore::new(dir.path().to_path_buf()));
        let key = StorageKey::diary("u1", "a1").unwrap();

        let url = uploader.upload(&key, vec![0xff]).await.unwrap();

        assert!(url.starts_with("file://"));
        assert!(url.ends_with("images/diary/u1/a1"));
    }

    #[tokio::test]
    async fn test_url_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        let key = StorageKey::profile("nobody").unwrap();

        let result = store.url(&StorageRef::for_bytes(key, b"")).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_from_config() {
        let config = StorageConfig {
            root: PathBuf::from("/srv/objects"),
            public_url: String::new(),
        };
        let store = FileStore::from_config(&config);
        assert_eq!(store.root(), Path::new("/srv/objects"));
        assert!(store.public_url.is_none());
    }
}
