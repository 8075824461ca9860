use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::ApiError;
use crate::models::{DiaryDraft, ServiceResponse, UserInfo};
use crate::service::{DiaryService, UserUpdateService};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Default)]
struct Records {
    users: HashMap<String, UserInfo>,
    password_changes: HashMap<String, usize>,
    diaries: Vec<DiaryDraft>,
}

/// In-process implementation of the remote services for testing and offline use.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<Records>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user so updates addressed to its id are accepted.
    pub fn with_user(self, user: UserInfo) -> Self {
        self.records().users.insert(user.id.clone(), user);
        self
    }

    pub fn user(&self, id: &str) -> Option<UserInfo> {
        self.records().users.get(id).cloned()
    }

    /// How many times the password of `id` has been changed.
    pub fn password_changes(&self, id: &str) -> usize {
        self.records().password_changes.get(id).copied().unwrap_or(0)
    }

    /// Diaries created so far, oldest first.
    pub fn diaries(&self) -> Vec<DiaryDraft> {
        self.records().diaries.clone()
    }

    fn records(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn modify_user(&self, id: &str, apply: impl FnOnce(&mut UserInfo)) -> ServiceResponse {
        match self.records().users.get_mut(id) {
            Some(user) => {
                apply(user);
                ServiceResponse::ok()
            }
            None => ServiceResponse::rejected("User not found"),
        }
    }
}

impl UserUpdateService for MemoryBackend {
    async fn update_nickname(&self, id: &str, value: &str) -> Result<ServiceResponse, ApiError> {
        Ok(self.modify_user(id, |user| user.nick_name = value.to_string()))
    }

    async fn update_password(&self, id: &str, value: &str) -> Result<ServiceResponse, ApiError> {
        if value.chars().count() < MIN_PASSWORD_LEN {
            return Ok(ServiceResponse::rejected(
                "Password must be at least 8 characters",
            ));
        }
        let reply = self.modify_user(id, |_| {});
        if reply.success {
            *self
                .records()
                .password_changes
                .entry(id.to_string())
                .or_default() += 1;
        }
        Ok(reply)
    }

    async fn update_profile_image(&self, id: &str, url: &str) -> Result<ServiceResponse, ApiError> {
        Ok(self.modify_user(id, |user| user.profile = url.to_string()))
    }
}

impl DiaryService for MemoryBackend {
    async fn create_diary(&self, draft: &DiaryDraft) -> Result<ServiceResponse, ApiError> {
        let mut records = self.records();
        if !records.users.contains_key(draft.user_id()) {
            return Ok(ServiceResponse::rejected("User not found"));
        }
        records.diaries.push(draft.clone());
        Ok(ServiceResponse::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn backend() -> MemoryBackend {
        MemoryBackend::new().with_user(UserInfo {
            id: "u1".into(),
            email: "u1@example.com".into(),
            nick_name: "old".into(),
            profile: "https://x/old".into(),
        })
    }

    #[tokio::test]
    async fn test_update_nickname() {
        let backend = backend();

        let reply = backend.update_nickname("u1", "moon").await.unwrap();

        assert!(reply.success);
        assert_eq!(backend.user("u1").unwrap().nick_name, "moon");
    }

    #[tokio::test]
    async fn test_unknown_user_is_rejected() {
        let backend = backend();

        let reply = backend.update_profile_image("ghost", "https://x/y").await.unwrap();

        assert!(!reply.success);
        assert_eq!(reply.message.as_deref(), Some("User not found"));
    }

    #[tokio::test]
    async fn test_short_password_is_rejected() {
        let backend = backend();

        let reply = backend.update_password("u1", "short").await.unwrap();
        assert!(!reply.success);
        assert_eq!(backend.password_changes("u1"), 0);

        let reply = backend.update_password("u1", "long-enough").await.unwrap();
        assert!(reply.success);
        assert_eq!(backend.password_changes("u1"), 1);
    }

    #[tokio::test]
    async fn test_profile_reset_to_default() {
        let backend = backend();

        backend.update_profile_image("u1", "").await.unwrap();

        assert!(!backend.user("u1").unwrap().has_custom_profile());
    }

    #[tokio::test]
    async fn test_create_diary() {
        let backend = backend();
        let draft = DiaryDraft::new("u1", "t", "c", "", false, Utc::now());

        assert!(backend.create_diary(&draft).await.unwrap().success);
        assert_eq!(backend.diaries(), vec![draft]);

        let stranger = DiaryDraft::new("u2", "t", "c", "", false, Utc::now());
        assert!(!backend.create_diary(&stranger).await.unwrap().success);
        assert_eq!(backend.diaries().len(), 1);
    }
}
