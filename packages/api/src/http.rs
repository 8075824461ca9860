//! # HTTP client for the remote services
//!
//! [`HttpClient`] implements [`UserUpdateService`] and [`DiaryService`] over JSON
//! `POST` requests. Every call is sent once; a non-2xx status is returned as
//! [`ApiError::Status`] with the response body, and a body that does not decode as a
//! [`ServiceResponse`] surfaces as [`ApiError::Transport`].
//!
//! | Call | Endpoint | Body |
//! |------|----------|------|
//! | `update_nickname` | `POST {base}/user/nickname` | [`UpdateRequest`] |
//! | `update_password` | `POST {base}/user/password` | [`UpdateRequest`] |
//! | `update_profile_image` | `POST {base}/user/profile` | [`UpdateRequest`] |
//! | `create_diary` | `POST {base}/diary` | [`DiaryDraft`] |

use std::time::Duration;

use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{DiaryDraft, ServiceResponse, UpdateRequest};
use crate::service::{DiaryService, UserUpdateService};

pub const NICKNAME_PATH: &str = "user/nickname";
pub const PASSWORD_PATH: &str = "user/password";
pub const PROFILE_PATH: &str = "user/profile";
pub const DIARY_PATH: &str = "diary";

/// JSON-over-HTTP implementation of the remote services.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(Self::with_client(builder.build()?, config.base_url.as_str()))
    }

    /// Full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ServiceResponse, ApiError> {
        let url = self.endpoint(path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "remote call failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ServiceResponse = response.json().await?;
        tracing::debug!(%url, success = reply.success, "remote call answered");
        Ok(reply)
    }

    async fn update(&self, path: &str, id: &str, value: &str) -> Result<ServiceResponse, ApiError> {
        let body = UpdateRequest {
            id: id.to_string(),
            value: value.to_string(),
        };
        self.post(path, &body).await
    }
}

impl UserUpdateService for HttpClient {
    async fn update_nickname(&self, id: &str, value: &str) -> Result<ServiceResponse, ApiError> {
        self.update(NICKNAME_PATH, id, value).await
    }

    async fn update_password(&self, id: &str, value: &str) -> Result<ServiceResponse, ApiError> {
        self.update(PASSWORD_PATH, id, value).await
    }

    async fn update_profile_image(&self, id: &str, url: &str) -> Result<ServiceResponse, ApiError> {
        self.update(PROFILE_PATH, id, url).await
    }
}

impl DiaryService for HttpClient {
    async fn create_diary(&self, draft: &DiaryDraft) -> Result<ServiceResponse, ApiError> {
        self.post(DIARY_PATH, draft).await
    }
}
