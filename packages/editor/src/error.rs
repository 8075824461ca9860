//! Outcomes and errors of an edit or a diary submission.
//!
//! Every [`MutationError`] is written to the surface's inline message channel
//! before it is returned; callers never need to render it themselves.

use api::ApiError;
use store::{StoreError, UploadError};

use crate::settings::Messages;

/// The result of a request that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The remote write was accepted and local state updated.
    Committed,
    /// Nothing was attempted.
    Skipped(SkipReason),
}

/// Why a request was abandoned without contacting any service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No identity token is present.
    SignedOut,
    /// The request names no subject.
    MissingSubject,
    /// An image edit with no file selected.
    NoAsset,
    /// A text attribute without a remote endpoint.
    NoEndpoint,
}

#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    /// Required input was blank.
    #[error("value required")]
    Validation,

    /// The service answered `success: false`.
    #[error("rejected by server{}", detail(.message))]
    Rejected { message: Option<String> },

    #[error(transparent)]
    Transport(#[from] ApiError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Key(#[from] StoreError),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl MutationError {
    /// The text to show inline, if any. A rejection without a message shows nothing.
    pub fn inline_message(&self, messages: &Messages) -> Option<String> {
        match self {
            MutationError::Validation => Some(messages.value_required.clone()),
            MutationError::Rejected { message } => message.clone(),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_messages() {
        let messages = Messages::default();

        assert_eq!(
            MutationError::Validation.inline_message(&messages).as_deref(),
            Some("값을 입력해주세요.")
        );
        assert_eq!(
            MutationError::Rejected { message: None }.inline_message(&messages),
            None
        );

        let unavailable = MutationError::from(ApiError::Unavailable("offline".into()));
        assert_eq!(
            unavailable.inline_message(&messages).as_deref(),
            Some("service unavailable: offline")
        );
    }

    #[test]
    fn test_rejected_display() {
        let err = MutationError::Rejected {
            message: Some("nickname taken".into()),
        };
        assert_eq!(err.to_string(), "rejected by server: nickname taken");
        assert_eq!(
            MutationError::Rejected { message: None }.to_string(),
            "rejected by server"
        );
    }
}
