// src/handlers/health.rs
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET /healthz
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

/// GET /api/version
pub async fn version() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Request/response logging middleware for axum"
    }))
}
