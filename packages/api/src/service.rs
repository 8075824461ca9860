//! Service traits for the remote update endpoints.
//!
//! Each method is exactly one network call with no local retry. A returned
//! `Ok(ServiceResponse { success: false, .. })` is a rejection the service chose
//! to report; `Err` means the call itself failed.

use std::future::Future;

use crate::error::ApiError;
use crate::models::{DiaryDraft, ServiceResponse};

/// Persists single profile attributes.
pub trait UserUpdateService {
    fn update_nickname(
        &self,
        id: &str,
        value: &str,
    ) -> impl Future<Output = Result<ServiceResponse, ApiError>>;
    fn update_password(
        &self,
        id: &str,
        value: &str,
    ) -> impl Future<Output = Result<ServiceResponse, ApiError>>;
    /// Set the profile image URL; an empty URL restores the default image.
    fn update_profile_image(
        &self,
        id: &str,
        url: &str,
    ) -> impl Future<Output = Result<ServiceResponse, ApiError>>;
}

/// Persists diary entries.
pub trait DiaryService {
    fn create_diary(
        &self,
        draft: &DiaryDraft,
    ) -> impl Future<Output = Result<ServiceResponse, ApiError>>;
}
