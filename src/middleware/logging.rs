// src/middleware/logging.rs
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::Instant,
};

use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::Response,
};
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::context::{self, RequestId};
use crate::middleware::capture;
use crate::middleware::policy::LogPolicy;

/// Target of every line emitted by this middleware.
pub const LOG_TARGET: &str = "reqreslog::request";

/// Payload of the single record emitted for an eligible request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub request_method: String,
    pub request_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time: Option<f64>,
}

impl LogRecord {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_method: method.into(),
            request_path: path.into(),
            request_body: None,
            response_body: None,
            run_time: None,
        }
    }

    pub fn emit(&self) {
        info!(
            target: LOG_TARGET,
            request_method = %self.request_method,
            request_path = %self.request_path,
            request_body = self.request_body.as_ref().map(display),
            response_body = self.response_body.as_ref().map(display),
            run_time = self.run_time,
            "request/response"
        );
    }
}

/// Path plus query string, as the client sent it.
pub fn full_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Request/response logging middleware with correlation ID.
///
/// Install with `axum::middleware::from_fn_with_state(Arc<LogPolicy>, request_logger)`.
/// Every request gets a fresh [`RequestId`], stored in the request extensions
/// and in the correlation context for the whole downstream call.
pub async fn request_logger(
    State(policy): State<Arc<LogPolicy>>,
    mut req: Request,
    next: Next,
) -> Response {
    let request_id = RequestId::generate();
    req.extensions_mut().insert(request_id.clone());

    context::scope(request_id, log_exchange(policy, req, next)).await
}

async fn log_exchange(policy: Arc<LogPolicy>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_path = full_path(req.uri());
    let is_logged = policy.is_logged(&request_path);
    let mut record = LogRecord::new(req.method().as_str(), request_path);

    let req = if is_logged {
        let (req, body) = capture::request_body(req).await;
        record.request_body = Some(body);
        req
    } else {
        req
    };

    let guard = InFlight(Some(record));
    let outcome = AssertUnwindSafe(next.run(req)).catch_unwind().await;
    let mut record = guard.complete();

    let response = match outcome {
        Ok(response) => response,
        Err(payload) => {
            error!(
                target: LOG_TARGET,
                "Unhandled Exception: {}",
                panic_message(&*payload)
            );
            panic::resume_unwind(payload);
        }
    };

    if !is_logged {
        return response;
    }

    let (response, body) = capture::response_body(response).await;
    record.response_body = Some(body);
    record.run_time = Some(start.elapsed().as_secs_f64());
    record.emit();

    response
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

/// Warns if the exchange is dropped while the handler is still running.
struct InFlight(Option<LogRecord>);

impl InFlight {
    fn complete(mut self) -> LogRecord {
        self.0.take().unwrap_or_else(|| LogRecord::new("", ""))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(record) = &self.0 {
            warn!(
                target: LOG_TARGET,
                request_method = %record.request_method,
                request_path = %record.request_path,
                "request cancelled before a response was produced"
            );
        }
    }
}
