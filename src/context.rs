// src/context.rs
//! Correlation id storage for the request currently being handled.
//!
//! The id lives in a tokio task-local slot. It is only visible to code
//! polled inside [`scope`] (or [`sync_scope`]), so two requests handled
//! concurrently, even on the same worker thread, each see their own id.

use std::fmt;
use std::future::Future;

use serde::Serialize;
use uuid::Uuid;

tokio::task_local! {
    static REQUEST_ID: RequestId;
}

/// Value reported when no request is active (startup, background tasks).
pub const NO_REQUEST_ID: &str = "none";

/// Correlation id attached to a single request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh random id, hex encoded without dashes.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runs `fut` with `id` as the current request id.
pub async fn scope<F>(id: RequestId, fut: F) -> F::Output
where
    F: Future,
{
    REQUEST_ID.scope(id, fut).await
}

/// Synchronous counterpart of [`scope`] for code running outside a task.
pub fn sync_scope<F, R>(id: RequestId, f: F) -> R
where
    F: FnOnce() -> R,
{
    REQUEST_ID.sync_scope(id, f)
}

/// Calls `f` with the current id, or [`NO_REQUEST_ID`] outside a scope.
pub fn with_current<F, R>(f: F) -> R
where
    F: FnOnce(&str) -> R,
{
    match REQUEST_ID.try_with(|id| id.0.clone()) {
        Ok(id) => f(&id),
        Err(_) => f(NO_REQUEST_ID),
    }
}

/// Current request id, or `"none"`.
pub fn current() -> String {
    with_current(str::to_owned)
}
