//! Storage keys.
//!
//! Keys are slash-separated paths namespaced by purpose and subject:
//!
//! ```text
//! images/profile/{user_id}
//! images/diary/{user_id}/{asset_id}
//! ```
//!
//! Every segment must be non-empty, must not be `.` or `..`, and must not itself
//! contain a `/`, so a user id can never escape its namespace.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

const IMAGES_ROOT: &str = "images";

/// A validated object key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);

impl StorageKey {
    /// Build a key from individual path segments.
    pub fn from_segments<I, T>(segments: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut path = String::new();
        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() || segment.contains('/') || segment == "." || segment == ".." {
                return Err(StoreError::InvalidKey(format!(
                    "invalid segment {segment:?}"
                )));
            }
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(segment);
        }
        if path.is_empty() {
            return Err(StoreError::InvalidKey("empty key".to_string()));
        }
        Ok(Self(path))
    }

    /// Key for a user's profile image: `images/profile/{user_id}`.
    pub fn profile(user_id: &str) -> Result<Self, StoreError> {
        Self::from_segments([IMAGES_ROOT, "profile", user_id])
    }

    /// Key for an image attached to a diary entry: `images/diary/{user_id}/{asset_id}`.
    pub fn diary(user_id: &str, asset_id: &str) -> Result<Self, StoreError> {
        Self::from_segments([IMAGES_ROOT, "diary", user_id, asset_id])
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StorageKey {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_segments(value.split('/'))
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}
