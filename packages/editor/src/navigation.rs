use std::sync::{Arc, Mutex, MutexGuard};

/// Destinations an edit can send the user to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Root,
    SignIn,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::SignIn => "/signin",
        }
    }
}

/// Something that can move the application to another view.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// Navigator that records every navigation, oldest first.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Arc<Mutex<Vec<Route>>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Route> {
        self.lock().clone()
    }

    pub fn current(&self) -> Option<Route> {
        self.lock().last().copied()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Route>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = route.path(), "navigate");
        self.lock().push(route);
    }
}
