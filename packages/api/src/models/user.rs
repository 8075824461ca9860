//! # User model
//!
//! [`UserInfo`] is the snapshot of the signed-in user fetched at session start. Its
//! serde representation matches the remote service: the identity is `_id`, the
//! display name is `nickName`, and `profile` is the avatar URL (empty string when
//! the user falls back to the default image).

use serde::{Deserialize, Serialize};

/// User attributes as returned by the remote service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nick_name: String,
    /// Avatar URL. Empty means the default image.
    #[serde(default)]
    pub profile: String,
}

impl UserInfo {
    /// Get display name, falling back to email if the nickname is not set.
    pub fn display_name(&self) -> &str {
        if self.nick_name.is_empty() {
            &self.email
        } else {
            &self.nick_name
        }
    }

    /// Whether the user has a custom profile image.
    pub fn has_custom_profile(&self) -> bool {
        !self.profile.is_empty()
    }
}
