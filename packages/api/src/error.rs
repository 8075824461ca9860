//! Error type for remote service calls.

/// A remote call that did not produce a [`ServiceResponse`](crate::ServiceResponse).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service unavailable: {0}")]
    Unavailable(String),
}
