//! # API crate: remote services behind the profile editor and diary composer
//!
//! This crate defines the remote side of every user-visible edit: the wire models,
//! the service traits the coordination layer is generic over, and two
//! implementations of those traits.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire models: [`UserInfo`], [`DiaryDraft`], [`UpdateRequest`], [`ServiceResponse`] |
//! | [`service`] | [`UserUpdateService`] (nickname, password, profile image) and [`DiaryService`] |
//! | [`http`] | [`HttpClient`], the JSON-over-HTTP implementation used in production |
//! | [`config`] | The `[api]` configuration section ([`ApiConfig`]) |
//! | [`error`] | [`ApiError`] |
//!
//! [`MemoryBackend`] implements both traits in-process for tests and offline use.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod service;

mod memory;
pub use memory::MemoryBackend;

pub use config::ApiConfig;
pub use error::ApiError;
pub use http::HttpClient;
pub use models::{DiaryDraft, ServiceResponse, UpdateRequest, UserInfo};
pub use service::{DiaryService, UserUpdateService};
