//! Data models exchanged with the remote services.

mod diary;
mod user;
mod wire;

pub use diary::DiaryDraft;
pub use user::UserInfo;
pub use wire::{ServiceResponse, UpdateRequest};
