use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A diary entry ready to be persisted.
///
/// Built once per submission and never mutated afterwards; `writer` is always the
/// submitting user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiaryDraft {
    user_id: String,
    title: String,
    content: String,
    /// Attached image URL, empty when no image was attached.
    post_image: String,
    /// Visible to other users.
    share_post: bool,
    date: DateTime<Utc>,
    writer: String,
}

impl DiaryDraft {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        post_image: impl Into<String>,
        share_post: bool,
        date: DateTime<Utc>,
    ) -> Self {
        let user_id = user_id.into();
        Self {
            writer: user_id.clone(),
            user_id,
            title: title.into(),
            content: content.into(),
            post_image: post_image.into(),
            share_post,
            date,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn post_image(&self) -> &str {
        &self.post_image
    }

    pub fn share_post(&self) -> bool {
        self.share_post
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn writer(&self) -> &str {
        &self.writer
    }
}
