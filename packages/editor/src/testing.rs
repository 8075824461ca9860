//! Recording fakes shared by the coordinator and submission tests.

use std::sync::{Arc, Mutex};

use api::{ApiError, DiaryDraft, DiaryService, MemoryBackend, ServiceResponse, UserInfo, UserUpdateService};
use store::{MemoryStore, ObjectStore, StorageKey, StorageRef, StoreError};

/// Ordered log of service calls across fakes.
#[derive(Clone, Debug, Default)]
pub(crate) struct Calls(Arc<Mutex<Vec<String>>>);

impl Calls {
    pub(crate) fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub(crate) fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub(crate) fn user() -> UserInfo {
    UserInfo {
        id: "u1".into(),
        email: "u1@example.com".into(),
        nick_name: "old".into(),
        profile: "https://x/old".into(),
    }
}

/// Snapshot of surrounding state, recorded after each call it is attached to.
pub(crate) type Observer = Arc<dyn Fn() -> String + Send + Sync>;

fn observe(calls: &Calls, observer: &Option<Observer>) {
    if let Some(observer) = observer {
        calls.push(observer());
    }
}

/// How a fake service should answer.
#[derive(Clone, Debug, Default)]
pub(crate) enum Reply {
    /// Delegate to the in-memory backend.
    #[default]
    Backend,
    Reject(Option<&'static str>),
    Fail(&'static str),
}

#[derive(Clone)]
pub(crate) struct FakeServices {
    pub(crate) backend: MemoryBackend,
    pub(crate) calls: Calls,
    pub(crate) reply: Reply,
    observer: Option<Observer>,
}

impl FakeServices {
    pub(crate) fn new(calls: &Calls) -> Self {
        Self {
            backend: MemoryBackend::new().with_user(user()),
            calls: calls.clone(),
            reply: Reply::Backend,
            observer: None,
        }
    }

    pub(crate) fn replying(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }

    pub(crate) fn observing(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    fn canned(&self) -> Option<Result<ServiceResponse, ApiError>> {
        match self.reply {
            Reply::Backend => None,
            Reply::Reject(message) => Some(Ok(ServiceResponse {
                success: false,
                message: message.map(str::to_string),
            })),
            Reply::Fail(reason) => Some(Err(ApiError::Unavailable(reason.to_string()))),
        }
    }
}

impl UserUpdateService for FakeServices {
    async fn update_nickname(&self, id: &str, value: &str) -> Result<ServiceResponse, ApiError> {
        self.calls.push(format!("nickname:{value}"));
        match self.canned() {
            Some(reply) => reply,
            None => self.backend.update_nickname(id, value).await,
        }
    }

    async fn update_password(&self, id: &str, value: &str) -> Result<ServiceResponse, ApiError> {
        self.calls.push("password");
        match self.canned() {
            Some(reply) => reply,
            None => self.backend.update_password(id, value).await,
        }
    }

    async fn update_profile_image(&self, id: &str, url: &str) -> Result<ServiceResponse, ApiError> {
        self.calls.push(format!("profile:{url}"));
        observe(&self.calls, &self.observer);
        match self.canned() {
            Some(reply) => reply,
            None => self.backend.update_profile_image(id, url).await,
        }
    }
}

impl DiaryService for FakeServices {
    async fn create_diary(&self, draft: &DiaryDraft) -> Result<ServiceResponse, ApiError> {
        self.calls.push(format!("diary:{}", draft.post_image()));
        match self.canned() {
            Some(reply) => reply,
            None => self.backend.create_diary(draft).await,
        }
    }
}

#[derive(Clone)]
pub(crate) struct FakeStore {
    pub(crate) inner: MemoryStore,
    pub(crate) calls: Calls,
    fail_put: bool,
    fail_url: bool,
    observer: Option<Observer>,
}

impl FakeStore {
    pub(crate) fn new(calls: &Calls) -> Self {
        Self {
            inner: MemoryStore::with_base_url("https://x"),
            calls: calls.clone(),
            fail_put: false,
            fail_url: false,
            observer: None,
        }
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail_put = true;
        self
    }

    /// Accept writes but refuse to hand out URLs.
    pub(crate) fn without_urls(mut self) -> Self {
        self.fail_url = true;
        self
    }

    pub(crate) fn observing(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl ObjectStore for FakeStore {
    async fn put(&self, key: &StorageKey, data: Vec<u8>) -> Result<StorageRef, StoreError> {
        self.calls.push(format!("put:{key}"));
        observe(&self.calls, &self.observer);
        if self.fail_put {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.inner.put(key, data).await
    }

    async fn url(&self, object: &StorageRef) -> Result<String, StoreError> {
        self.calls.push(format!("url:{}", object.key));
        observe(&self.calls, &self.observer);
        if self.fail_url {
            return Err(StoreError::Unavailable("no public endpoint".to_string()));
        }
        self.inner.url(object).await
    }
}
