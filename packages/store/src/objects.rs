//! # Stored object metadata
//!
//! Every successful [`ObjectStore::put`](crate::ObjectStore::put) yields a
//! [`StorageRef`]: the key the bytes were written under, a content digest, and the
//! byte length. The reference is what the caller later hands back to resolve a
//! public URL, so a store never has to guess which version of a key was meant.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Sha`] | 20-byte SHA-1 digest of the stored bytes, used as an etag. Hex round-trips via [`Sha::from_hex`] / [`Sha::to_hex`]. |
//! | [`StorageRef`] | Handle to one stored object. |

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::key::StorageKey;

/// A 20-byte SHA-1 digest identifying stored content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha(pub [u8; 20]);

impl Sha {
    /// Digest arbitrary bytes.
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hasher.finalize());
        Sha(bytes)
    }

    /// Create a Sha from a hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 40 || !hex.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; 20];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Sha(bytes))
    }

    /// Return the hex string representation.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for Sha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Reference to an object that has been written to a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRef {
    pub key: StorageKey,
    pub etag: Sha,
    pub size: usize,
}

impl StorageRef {
    /// Build a reference for `data` stored under `key`.
    pub fn for_bytes(key: StorageKey, data: &[u8]) -> Self {
        Self {
            key,
            etag: Sha::digest(data),
            size: data.len(),
        }
    }
}
