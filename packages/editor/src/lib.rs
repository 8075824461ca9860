//! # Editor crate: coordination of profile edits and diary submissions
//!
//! Sits between an editor surface (an overlay with a text input or file picker)
//! and the remote services in [`api`] and [`store`]. A surface builds an
//! [`EditRequest`] and hands it to the [`MutationCoordinator`] together with its
//! [`Overlay`]; the coordinator uploads assets when needed, calls the remote
//! update, writes [`UserStore`] and closes the overlay. Failures land in the
//! overlay's [`Feedback`] and leave both state and visibility unchanged.
//!
//! [`DiarySubmission`] runs the same upload-then-commit sequence for a diary entry
//! and navigates back to [`Route::Root`] when it succeeds.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`mutation`] | [`MutationCoordinator`] |
//! | [`diary`] | [`DiarySubmission`] and [`DiaryDraftInput`] |
//! | [`request`] | [`Category`], [`AttributeEdit`], [`EditRequest`], [`Asset`] |
//! | [`overlay`] | [`Overlay`] lifecycle, [`Feedback`], [`PointerHub`] outside-click detection |
//! | [`state`] | [`UserStore`] and the [`Indicator`] flags |
//! | [`session`] | [`IdentityStore`] token storage |
//! | [`navigation`] | [`Route`], [`Navigator`] |
//! | [`input`] | [`ChangeInput`] |
//! | [`settings`] | [`Settings`] loaded from `diary.toml` and the environment |
//! | [`error`] | [`Outcome`], [`SkipReason`], [`MutationError`] |

pub mod diary;
pub mod error;
pub mod input;
pub mod mutation;
pub mod navigation;
pub mod overlay;
pub mod request;
pub mod session;
pub mod settings;
pub mod state;

#[cfg(test)]
mod testing;

pub use diary::{Clock, DiaryDraftInput, DiarySubmission, SystemClock};
pub use error::{MutationError, Outcome, SkipReason};
pub use input::ChangeInput;
pub use mutation::MutationCoordinator;
pub use navigation::{History, Navigator, Route};
pub use overlay::{
    CloseReason, Feedback, InFlight, Overlay, OverlayMount, OverlayState, PointerEvent,
    PointerHub, PointerKind, Region,
};
pub use request::{Asset, AttributeEdit, Category, EditRequest};
pub use session::{FileIdentity, IdentityStore, MemoryIdentity};
pub use settings::{Messages, Settings};
pub use state::{Indicator, IndicatorGuard, UserStore, UserWriter};
