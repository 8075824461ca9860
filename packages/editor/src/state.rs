//! # Shared application state
//!
//! [`UserStore`] holds the signed-in user's attributes and broadcasts every change
//! over a [`tokio::sync::watch`] channel: once a write call returns, every
//! subscriber's `borrow()` sees the new value.
//!
//! Writes go through a [`UserWriter`], obtained with
//! [`begin_mutation`](UserStore::begin_mutation). The writer holds the store's
//! single-writer lock for the lifetime of one edit request, and each write method
//! consumes it, so a request can perform at most one shared-state write.
//!
//! [`Indicator`] is a boolean flag on the same kind of channel, used for
//! "operation in flight" spinners. [`Indicator::raise`] returns a guard; the flag is
//! lowered once the last live guard is dropped, on every exit path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use api::UserInfo;
use tokio::sync::{watch, Mutex, MutexGuard};

#[derive(Debug)]
struct Inner {
    tx: watch::Sender<Option<UserInfo>>,
    write_lock: Mutex<()>,
}

/// The observable record of the current user's attributes.
#[derive(Clone, Debug)]
pub struct UserStore {
    inner: Arc<Inner>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// A store with no signed-in user.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tx,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Current value.
    pub fn snapshot(&self) -> Option<UserInfo> {
        self.inner.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserInfo>> {
        self.inner.tx.subscribe()
    }

    /// Install the snapshot fetched at session start.
    pub async fn load(&self, user: UserInfo) {
        let _guard = self.inner.write_lock.lock().await;
        tracing::debug!(user = %user.id, "user state loaded");
        self.inner.tx.send_replace(Some(user));
    }

    /// Discard the state at logout.
    pub async fn clear(&self) {
        let _guard = self.inner.write_lock.lock().await;
        self.inner.tx.send_replace(None);
    }

    /// Take the single-writer lock for one edit request.
    pub async fn begin_mutation(&self) -> UserWriter<'_> {
        UserWriter {
            tx: &self.inner.tx,
            _guard: self.inner.write_lock.lock().await,
        }
    }

    /// Like [`begin_mutation`](Self::begin_mutation), but `None` if another request
    /// holds the lock.
    pub fn try_begin_mutation(&self) -> Option<UserWriter<'_>> {
        let guard = self.inner.write_lock.try_lock().ok()?;
        Some(UserWriter {
            tx: &self.inner.tx,
            _guard: guard,
        })
    }
}

/// Exclusive write access to a [`UserStore`] for one request.
#[derive(Debug)]
pub struct UserWriter<'a> {
    tx: &'a watch::Sender<Option<UserInfo>>,
    _guard: MutexGuard<'a, ()>,
}

impl UserWriter<'_> {
    /// Set the profile image URL. Empty restores the default image.
    pub fn set_profile(self, url: impl Into<String>) {
        let url = url.into();
        self.modify(move |user| user.profile = url);
    }

    pub fn set_nickname(self, nick_name: impl Into<String>) {
        let nick_name = nick_name.into();
        self.modify(move |user| user.nick_name = nick_name);
    }

    fn modify(self, apply: impl FnOnce(&mut UserInfo)) {
        self.tx.send_if_modified(|state| match state {
            Some(user) => {
                apply(user);
                true
            }
            None => {
                tracing::debug!("no user loaded, state write dropped");
                false
            }
        });
    }
}

/// A shared boolean "in progress" flag.
///
/// The flag stays raised while at least one guard is alive.
#[derive(Clone, Debug)]
pub struct Indicator {
    inner: Arc<IndicatorInner>,
}

#[derive(Debug)]
struct IndicatorInner {
    tx: watch::Sender<bool>,
    holders: AtomicUsize,
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(IndicatorInner {
                tx,
                holders: AtomicUsize::new(0),
            }),
        }
    }

    pub fn is_raised(&self) -> bool {
        *self.inner.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.tx.subscribe()
    }

    /// Raise the flag until the returned guard, and every other live guard, is dropped.
    pub fn raise(&self) -> IndicatorGuard {
        let inner = &self.inner;
        // The holder count only changes under the channel's write lock.
        inner.tx.send_if_modified(|raised| {
            inner.holders.fetch_add(1, Ordering::SeqCst);
            !std::mem::replace(raised, true)
        });
        IndicatorGuard {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Releases its hold on an [`Indicator`] on drop.
#[derive(Debug)]
#[must_use = "the indicator is lowered as soon as the guard is dropped"]
pub struct IndicatorGuard {
    inner: Arc<IndicatorInner>,
}

impl Drop for IndicatorGuard {
    fn drop(&mut self) {
        let inner = &self.inner;
        inner.tx.send_if_modified(|raised| {
            if inner.holders.fetch_sub(1, Ordering::SeqCst) == 1 {
                *raised = false;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".into(),
            email: "u1@example.com".into(),
            nick_name: "old".into(),
            profile: "https://x/old".into(),
        }
    }

    #[tokio::test]
    async fn test_write_visible_to_subscribers() {
        let store = UserStore::new();
        store.load(user()).await;
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.begin_mutation().await.set_nickname("moon");

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().as_ref().unwrap().nick_name, "moon");
        assert_eq!(store.snapshot().unwrap().profile, "https://x/old");
    }

    #[tokio::test]
    async fn test_single_writer() {
        let store = UserStore::new();
        store.load(user()).await;

        let writer = store.begin_mutation().await;
        assert!(store.try_begin_mutation().is_none());

        writer.set_profile("");
        let second = store.try_begin_mutation();
        assert!(second.is_some());
        assert_eq!(store.snapshot().unwrap().profile, "");
    }

    #[tokio::test]
    async fn test_write_without_user_is_dropped() {
        let store = UserStore::new();
        let rx = store.subscribe();

        store.begin_mutation().await.set_profile("https://x/y");

        assert!(store.snapshot().is_none());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_clear_on_logout() {
        let store = UserStore::new();
        store.load(user()).await;
        store.clear().await;
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_indicator_guard() {
        let loading = Indicator::new();
        assert!(!loading.is_raised());
        {
            let _guard = loading.raise();
            assert!(loading.is_raised());
        }
        assert!(!loading.is_raised());
    }

    #[test]
    fn test_indicator_overlapping_guards() {
        let loading = Indicator::new();
        let first = loading.raise();
        let second = loading.raise();

        drop(first);
        assert!(loading.is_raised());

        drop(second);
        assert!(!loading.is_raised());

        let _again = loading.raise();
        assert!(loading.is_raised());
    }

    #[test]
    fn test_indicator_lowered_on_early_return() {
        fn work(loading: &Indicator) -> Result<(), &'static str> {
            let _guard = loading.raise();
            if loading.is_raised() {
                return Err("failed midway");
            }
            Ok(())
        }

        let loading = Indicator::new();
        assert!(work(&loading).is_err());
        assert!(!loading.is_raised());
    }
}
