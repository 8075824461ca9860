//! Diary draft submission.
//!
//! Same shape as a profile edit: an optional upload, one remote create call, then
//! navigation back to the root view. The loading [`Indicator`] stays raised for the
//! whole submission and is lowered on every exit path.

use api::{DiaryDraft, DiaryService};
use chrono::{DateTime, Utc};
use store::{ObjectStore, StorageKey, Uploader};
use uuid::Uuid;

use crate::error::{MutationError, Outcome, SkipReason};
use crate::mutation::accepted;
use crate::navigation::{Navigator, Route};
use crate::overlay::Feedback;
use crate::request::Asset;
use crate::session::IdentityStore;
use crate::settings::Messages;
use crate::state::Indicator;

/// What the diary form collects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiaryDraftInput {
    pub title: String,
    pub content: String,
    pub share_post: bool,
    pub asset: Option<Asset>,
}

/// Source of the draft timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct DiarySubmission<D, S: ObjectStore, I, N, C = SystemClock> {
    diaries: D,
    uploader: Uploader<S>,
    identity: I,
    navigator: N,
    clock: C,
    loading: Indicator,
    feedback: Feedback,
    messages: Messages,
}

impl<D, S, I, N> DiarySubmission<D, S, I, N>
where
    D: DiaryService,
    S: ObjectStore,
    I: IdentityStore,
    N: Navigator,
{
    pub fn new(diaries: D, storage: S, identity: I, navigator: N) -> Self {
        Self {
            diaries,
            uploader: Uploader::new(storage),
            identity,
            navigator,
            clock: SystemClock,
            loading: Indicator::new(),
            feedback: Feedback::new(),
            messages: Messages::default(),
        }
    }
}

impl<D, S, I, N, C> DiarySubmission<D, S, I, N, C>
where
    D: DiaryService,
    S: ObjectStore,
    I: IdentityStore,
    N: Navigator,
    C: Clock,
{
    pub fn with_clock<C2: Clock>(self, clock: C2) -> DiarySubmission<D, S, I, N, C2> {
        DiarySubmission {
            diaries: self.diaries,
            uploader: self.uploader,
            identity: self.identity,
            navigator: self.navigator,
            clock,
            loading: self.loading,
            feedback: self.feedback,
            messages: self.messages,
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn loading(&self) -> &Indicator {
        &self.loading
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Persist one diary entry and return to the root view.
    pub async fn submit(&self, input: DiaryDraftInput) -> Result<Outcome, MutationError> {
        let Some(user_id) = self.identity.subject_id() else {
            tracing::debug!("no identity token, diary skipped");
            return Ok(Outcome::Skipped(SkipReason::SignedOut));
        };

        let _loading = self.loading.raise();
        match self.persist(&user_id, input).await {
            Ok(()) => {
                tracing::info!(%user_id, "diary created");
                self.feedback.clear();
                self.navigator.navigate(Route::Root);
                Ok(Outcome::Committed)
            }
            Err(err) => {
                tracing::warn!(%user_id, "diary submission failed: {err}");
                if let Some(message) = err.inline_message(&self.messages) {
                    self.feedback.set(message);
                }
                Err(err)
            }
        }
    }

    async fn persist(&self, user_id: &str, input: DiaryDraftInput) -> Result<(), MutationError> {
        let DiaryDraftInput {
            title,
            content,
            share_post,
            asset,
        } = input;

        let post_image = match asset {
            Some(asset) => {
                let asset_id = Uuid::new_v4().to_string();
                let key = StorageKey::diary(user_id, &asset_id)?;
                self.uploader.upload(&key, asset.into_bytes()).await?
            }
            None => String::new(),
        };

        let draft = DiaryDraft::new(
            user_id,
            title,
            content,
            post_image,
            share_post,
            self.clock.now(),
        );
        accepted(self.diaries.create_diary(&draft).await?)
    }
}
