// src/handlers/echo.rs
use axum::{body::Bytes, response::IntoResponse, Extension, Json};
use serde_json::json;
use tracing::info;

use crate::context::RequestId;

/// POST /api/echo
pub async fn echo(Extension(request_id): Extension<RequestId>, body: Bytes) -> impl IntoResponse {
    info!(bytes = body.len(), "echoing request body");

    Json(json!({
        "request_id": request_id,
        "length": body.len(),
        "body": String::from_utf8_lossy(&body),
    }))
}

/// GET /api/panic
///
/// Always panics; exercises the unhandled-exception hook.
pub async fn trigger_panic() -> &'static str {
    panic!("requested panic")
}
