//! # Editing overlay lifecycle
//!
//! An [`Overlay`] is the dismissible surface an edit happens in. Its visibility is a
//! two-state machine, [`OverlayState::Open`] and [`OverlayState::Closed`]:
//!
//! | Transition | Trigger |
//! |------------|---------|
//! | `Closed → Open` | [`Overlay::open`], called by the parent view when the user opens the editor. |
//! | `Open → Closed` | [`Overlay::close`] with a [`CloseReason`]: a successful commit, a pointer-down outside the overlay's region, or an explicit cancel. |
//!
//! Closing an overlay that is already closed is a no-op, so an outside interaction
//! closes it exactly once. While a mutation is in flight (see
//! [`Overlay::begin_mutation`]) only [`CloseReason::Committed`] may close it.
//!
//! ## Outside-interaction dismissal
//!
//! [`Overlay::mount`] registers a single listener on a [`PointerHub`] and returns an
//! [`OverlayMount`] guard. The listener closes the overlay on any pointer-down whose
//! position lies outside the mounted [`Region`]. Dropping the guard removes that
//! listener and only that listener, on every teardown path.
//!
//! ## Inline messages
//!
//! Each overlay owns a [`Feedback`] channel that carries the message shown inside the
//! surface (validation errors, remote rejections, transport failures).

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

/// An observable inline message slot.
#[derive(Clone, Debug)]
pub struct Feedback {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new()
    }
}

impl Feedback {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn message(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn set(&self, message: impl Into<String>) {
        self.tx.send_replace(Some(message.into()));
    }

    pub fn clear(&self) {
        self.tx.send_if_modified(|message| message.take().is_some());
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Committed,
    OutsidePointer,
    Cancelled,
}

#[derive(Debug)]
struct OverlayInner {
    state: watch::Sender<OverlayState>,
    feedback: Feedback,
    in_flight: AtomicUsize,
}

/// Visibility and inline message of one editing surface.
#[derive(Clone, Debug)]
pub struct Overlay {
    inner: Arc<OverlayInner>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay {
    /// A closed overlay.
    pub fn new() -> Self {
        let (state, _) = watch::channel(OverlayState::Closed);
        Self {
            inner: Arc::new(OverlayInner {
                state,
                feedback: Feedback::new(),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// An overlay that starts open.
    pub fn opened() -> Self {
        let overlay = Self::new();
        overlay.open();
        overlay
    }

    pub fn state(&self) -> OverlayState {
        *self.inner.state.borrow()
    }

    pub fn is_open(&self) -> bool {
        self.state() == OverlayState::Open
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
        self.inner.state.subscribe()
    }

    pub fn feedback(&self) -> &Feedback {
        &self.inner.feedback
    }

    /// Show the overlay with a clean message slot. Returns whether it was closed.
    pub fn open(&self) -> bool {
        let opened = self.inner.state.send_if_modified(|state| {
            if *state == OverlayState::Closed {
                *state = OverlayState::Open;
                true
            } else {
                false
            }
        });
        if opened {
            self.inner.feedback.clear();
        }
        opened
    }

    /// Hide the overlay. Returns whether this call performed the transition.
    pub fn close(&self, reason: CloseReason) -> bool {
        if reason != CloseReason::Committed && self.is_in_flight() {
            tracing::debug!(?reason, "close ignored while a mutation is in flight");
            return false;
        }
        let closed = self.inner.state.send_if_modified(|state| {
            if *state == OverlayState::Open {
                *state = OverlayState::Closed;
                true
            } else {
                false
            }
        });
        if closed {
            tracing::debug!(?reason, "overlay closed");
        }
        closed
    }

    pub fn cancel(&self) -> bool {
        self.close(CloseReason::Cancelled)
    }

    /// Mark a mutation as in flight until the returned guard is dropped.
    pub fn begin_mutation(&self) -> InFlight {
        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        InFlight {
            overlay: self.clone(),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Start dismissing on pointer-downs outside `region` until the guard is dropped.
    pub fn mount(&self, hub: &Arc<PointerHub>, region: Region) -> OverlayMount {
        let overlay = self.clone();
        let id = hub.add_listener(move |event| {
            if event.kind == PointerKind::Down && !region.contains(event.x, event.y) {
                overlay.close(CloseReason::OutsidePointer);
            }
        });
        OverlayMount {
            hub: Arc::clone(hub),
            id,
        }
    }
}

/// Keeps an [`Overlay`] marked as busy.
#[derive(Debug)]
#[must_use = "the mutation is no longer marked in flight once the guard is dropped"]
pub struct InFlight {
    overlay: Overlay,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.overlay.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Axis-aligned screen rectangle occupied by an overlay's root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Move,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
        }
    }
}

pub type ListenerId = u64;

type Listener = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

/// Document-level pointer event dispatcher.
#[derive(Default)]
pub struct PointerHub {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_listener(
        &self,
        listener: impl Fn(&PointerEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    /// Deliver an event to every registered listener.
    pub fn dispatch(&self, event: &PointerEvent) {
        // Snapshot so listeners may add or remove listeners themselves.
        let listeners: Vec<Listener> = self
            .listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<(ListenerId, Listener)>> {
        self.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Registration of an overlay's outside-interaction listener.
#[derive(Debug)]
#[must_use = "the outside-interaction listener is removed when the mount is dropped"]
pub struct OverlayMount {
    hub: Arc<PointerHub>,
    id: ListenerId,
}

impl Drop for OverlayMount {
    fn drop(&mut self) {
        self.hub.remove_listener(self.id);
    }
}
