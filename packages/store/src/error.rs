//! Error types for object storage.

use crate::key::StorageKey;

/// Failure reported by an [`ObjectStore`](crate::ObjectStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("object not found: {0}")]
    NotFound(StorageKey),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Which half of an upload failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStage {
    Store,
    ResolveUrl,
}

impl std::fmt::Display for UploadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStage::Store => f.write_str("store"),
            UploadStage::ResolveUrl => f.write_str("resolve url"),
        }
    }
}

/// An upload attempt that did not produce a URL.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed for {key}: {source}")]
pub struct UploadError {
    pub stage: UploadStage,
    pub key: StorageKey,
    #[source]
    pub source: StoreError,
}
