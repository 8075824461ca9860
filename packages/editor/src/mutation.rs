//! # Mutation coordinator: one linear async pipeline per profile edit
//!
//! [`MutationCoordinator::commit`] takes an [`EditRequest`] and the [`Overlay`] it was
//! made in, and runs the whole edit as a single sequence:
//!
//! ```text
//! identity check → (upload → resolve URL) → remote update → state write → close overlay
//! ```
//!
//! ## Preconditions
//!
//! Without an identity token, or with an empty subject id, the request is abandoned
//! with [`Outcome::Skipped`]. An image edit without a selected file is skipped the same
//! way. None of these touch the overlay or its message.
//!
//! ## Branches
//!
//! | Edit | Remote call | On success |
//! |------|-------------|------------|
//! | `Image(Some(asset))` | upload to `images/profile/{subject}`, then `update_profile_image(url)` | profile ← url, close overlay |
//! | `Nickname(v)` | `update_nickname(trim(v))` | close overlay, nickname ← trim(v) |
//! | `Password(v)` | `update_password(v)` | close overlay, clear identity token, navigate to sign-in |
//! | `ResetImage` | `update_profile_image("")` | profile ← "", close overlay (a rejected reset keeps the old image) |
//! | `Text { .. }` | none | skipped after validation |
//!
//! Text edits whose trimmed value is empty fail with [`MutationError::Validation`]
//! before any remote service is contacted.
//!
//! ## Failure boundary
//!
//! Every failure (validation, `success: false`, transport, upload) is written to the
//! overlay's [`Feedback`](crate::Feedback) and returned; shared state and overlay
//! visibility are left untouched. An upload whose follow-up profile update fails
//! leaves the stored object behind; it is logged and not cleaned up here.
//!
//! ## Ordering
//!
//! The image-in-flight [`Indicator`] is raised for the whole image branch. The
//! overlay closes only after the remote update is confirmed and the state written,
//! and the indicator is lowered after that. Each request holds the [`UserStore`]
//! writer for its duration, so two edits against the same store are serialised.

use api::{ServiceResponse, UserUpdateService};
use store::{ObjectStore, StorageKey, Uploader};

use crate::error::{MutationError, Outcome, SkipReason};
use crate::navigation::{Navigator, Route};
use crate::overlay::{CloseReason, Overlay};
use crate::request::{Asset, AttributeEdit, EditRequest};
use crate::session::IdentityStore;
use crate::settings::Messages;
use crate::state::{Indicator, UserStore};

/// Treat `success: false` as a rejection.
pub(crate) fn accepted(reply: ServiceResponse) -> Result<(), MutationError> {
    if reply.success {
        Ok(())
    } else {
        Err(MutationError::Rejected {
            message: reply.message,
        })
    }
}

fn required(value: &str) -> Result<&str, MutationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(MutationError::Validation)
    } else {
        Ok(trimmed)
    }
}

/// Orchestrates profile edits against the remote services and shared state.
pub struct MutationCoordinator<U, S: ObjectStore, I, N> {
    users: U,
    uploader: Uploader<S>,
    identity: I,
    navigator: N,
    state: UserStore,
    image_loading: Indicator,
    messages: Messages,
}

impl<U, S, I, N> MutationCoordinator<U, S, I, N>
where
    U: UserUpdateService,
    S: ObjectStore,
    I: IdentityStore,
    N: Navigator,
{
    pub fn new(users: U, storage: S, identity: I, navigator: N, state: UserStore) -> Self {
        Self {
            users,
            uploader: Uploader::new(storage),
            identity,
            navigator,
            state,
            image_loading: Indicator::new(),
            messages: Messages::default(),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Share an existing image-in-flight indicator.
    pub fn with_image_loading(mut self, indicator: Indicator) -> Self {
        self.image_loading = indicator;
        self
    }

    pub fn image_loading(&self) -> &Indicator {
        &self.image_loading
    }

    pub fn state(&self) -> &UserStore {
        &self.state
    }

    /// Commit one edit made in `overlay`.
    pub async fn commit(
        &self,
        request: EditRequest,
        overlay: &Overlay,
    ) -> Result<Outcome, MutationError> {
        let kind = request.edit.kind();
        let Some(token) = self.identity.subject_id() else {
            tracing::debug!(kind, "no identity token, edit skipped");
            return Ok(Outcome::Skipped(SkipReason::SignedOut));
        };
        if request.subject_id.is_empty() {
            tracing::debug!(kind, "no subject, edit skipped");
            return Ok(Outcome::Skipped(SkipReason::MissingSubject));
        }

        let _busy = overlay.begin_mutation();
        let result = self.dispatch(&token, request, overlay).await;
        match &result {
            Ok(Outcome::Committed) => tracing::info!(kind, "edit committed"),
            Ok(Outcome::Skipped(reason)) => tracing::debug!(kind, ?reason, "edit skipped"),
            Err(err) => {
                tracing::warn!(kind, "edit failed: {err}");
                if let Some(message) = err.inline_message(&self.messages) {
                    overlay.feedback().set(message);
                }
            }
        }
        result
    }

    /// Restore the default profile image for `subject_id`.
    pub async fn reset_profile_image(
        &self,
        subject_id: &str,
        overlay: &Overlay,
    ) -> Result<Outcome, MutationError> {
        self.commit(EditRequest::reset_image(subject_id), overlay)
            .await
    }

    async fn dispatch(
        &self,
        token: &str,
        request: EditRequest,
        overlay: &Overlay,
    ) -> Result<Outcome, MutationError> {
        let EditRequest { subject_id, edit } = request;
        match edit {
            AttributeEdit::Image(None) => Ok(Outcome::Skipped(SkipReason::NoAsset)),
            AttributeEdit::Image(Some(asset)) => {
                self.commit_image(token, &subject_id, asset, overlay).await
            }
            AttributeEdit::ResetImage => self.commit_reset(token, overlay).await,
            AttributeEdit::Nickname(value) => {
                let value = required(&value)?;
                self.commit_nickname(token, value, overlay).await
            }
            AttributeEdit::Password(value) => {
                required(&value)?;
                self.commit_password(token, &value, overlay).await
            }
            AttributeEdit::Text { field, value } => {
                required(&value)?;
                tracing::debug!(%field, "no remote endpoint for text attribute");
                Ok(Outcome::Skipped(SkipReason::NoEndpoint))
            }
        }
    }

    async fn commit_image(
        &self,
        token: &str,
        subject_id: &str,
        asset: Asset,
        overlay: &Overlay,
    ) -> Result<Outcome, MutationError> {
        let writer = self.state.begin_mutation().await;
        let loading = self.image_loading.raise();

        let key = StorageKey::profile(subject_id)?;
        let url = self.uploader.upload(&key, asset.into_bytes()).await?;

        let updated = self
            .users
            .update_profile_image(token, &url)
            .await
            .map_err(MutationError::from)
            .and_then(accepted);
        if let Err(err) = updated {
            tracing::warn!(%key, "profile update failed, uploaded object left orphaned");
            return Err(err);
        }

        writer.set_profile(url);
        overlay.close(CloseReason::Committed);
        overlay.feedback().clear();
        drop(loading);
        Ok(Outcome::Committed)
    }

    async fn commit_nickname(
        &self,
        token: &str,
        value: &str,
        overlay: &Overlay,
    ) -> Result<Outcome, MutationError> {
        let writer = self.state.begin_mutation().await;
        accepted(self.users.update_nickname(token, value).await?)?;

        overlay.close(CloseReason::Committed);
        overlay.feedback().clear();
        writer.set_nickname(value);
        Ok(Outcome::Committed)
    }

    async fn commit_password(
        &self,
        token: &str,
        value: &str,
        overlay: &Overlay,
    ) -> Result<Outcome, MutationError> {
        accepted(self.users.update_password(token, value).await?)?;

        overlay.close(CloseReason::Committed);
        overlay.feedback().clear();
        self.identity.clear();
        self.navigator.navigate(Route::SignIn);
        Ok(Outcome::Committed)
    }

    async fn commit_reset(&self, token: &str, overlay: &Overlay) -> Result<Outcome, MutationError> {
        let writer = self.state.begin_mutation().await;
        accepted(self.users.update_profile_image(token, "").await?)?;

        writer.set_profile("");
        overlay.close(CloseReason::Committed);
        overlay.feedback().clear();
        Ok(Outcome::Committed)
    }
}
