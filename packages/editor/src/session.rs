//! # Identity token store
//!
//! The identity token is the id of the signed-in subject. Every edit reads it first;
//! without one the edit is abandoned silently. A password change removes it to force
//! a fresh sign-in.
//!
//! | Implementation | Backing |
//! |----------------|---------|
//! | [`MemoryIdentity`] | A shared in-process slot, for tests and ephemeral sessions. |
//! | [`FileIdentity`] | A single file holding the token, surviving restarts. Default location is `<data_dir>/diary/identity`. |

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lookup and removal of the current subject's identity token.
pub trait IdentityStore {
    /// The current token, if a non-empty one is present.
    fn subject_id(&self) -> Option<String>;
    fn set(&self, id: &str);
    fn clear(&self);
}

/// In-memory identity slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentity {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(id: &str) -> Self {
        let identity = Self::new();
        identity.set(id);
        identity
    }

    fn token(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IdentityStore for MemoryIdentity {
    fn subject_id(&self) -> Option<String> {
        self.token().clone().filter(|id| !id.is_empty())
    }

    fn set(&self, id: &str) {
        *self.token() = Some(id.to_string());
    }

    fn clear(&self) {
        *self.token() = None;
    }
}

/// Identity token persisted in a file.
#[derive(Clone, Debug)]
pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data_dir>/diary/identity`, falling back to the working directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("diary");
        Self::new(base.join("identity"))
    }
}

impl IdentityStore for FileIdentity {
    fn subject_id(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let id = content.trim();
        (!id.is_empty()).then(|| id.to_string())
    }

    fn set(&self, id: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), "failed to create identity dir: {e}");
            }
        }
        if let Err(e) = std::fs::write(&self.path, id) {
            tracing::warn!(path = %self.path.display(), "failed to persist identity: {e}");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), "failed to clear identity: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_identity() {
        let identity = MemoryIdentity::new();
        assert_eq!(identity.subject_id(), None);

        identity.set("");
        assert_eq!(identity.subject_id(), None);

        identity.set("u1");
        assert_eq!(identity.clone().subject_id().as_deref(), Some("u1"));

        identity.clear();
        assert_eq!(identity.subject_id(), None);
    }

    #[test]
    fn test_file_identity_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/identity");

        FileIdentity::new(path.clone()).set("u7");
        let reopened = FileIdentity::new(path.clone());
        assert_eq!(reopened.subject_id().as_deref(), Some("u7"));

        reopened.clear();
        assert!(!path.exists());
        // Clearing twice is harmless.
        reopened.clear();
        assert_eq!(reopened.subject_id(), None);
    }
}
