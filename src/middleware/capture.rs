// src/middleware/capture.rs
//! Best-effort body snapshots for the request/response log record.
//!
//! Nothing here can fail a request: every error is folded into the
//! captured value as `"err - <description>"`.

use axum::{
    body::{Body, HttpBody},
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;

use crate::error::CaptureError;

pub const ERR_PREFIX: &str = "err - ";
pub const FORM_DATA_PLACEHOLDER: &str = "some-form-data";
pub const TEXT_DATA_PLACEHOLDER: &str = "some-text-data";
pub const OTHER_DATA_PLACEHOLDER: &str = "some-other-data";

/// How a request body is represented in the log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    FormData,
    Text,
    Other,
}

impl BodyKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Other;
        };
        if content_type == "application/json" {
            Self::Json
        } else if content_type.starts_with("multipart/form-data;") {
            Self::FormData
        } else if content_type == "text/plain" {
            Self::Text
        } else {
            Self::Other
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_content_type(headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()))
    }

    fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Json => None,
            Self::FormData => Some(FORM_DATA_PLACEHOLDER),
            Self::Text => Some(TEXT_DATA_PLACEHOLDER),
            Self::Other => Some(OTHER_DATA_PLACEHOLDER),
        }
    }
}

pub fn err_value(err: impl Into<CaptureError>) -> Value {
    Value::String(format!("{ERR_PREFIX}{}", err.into()))
}

/// Bodies of unknown length (chunked) count as non-empty.
fn known_empty(body: &Body) -> bool {
    body.size_hint().exact() == Some(0)
}

/// Snapshot the request body, handing back a request with the same bytes.
///
/// Only JSON bodies are read; placeholders never touch the payload.
pub async fn request_body(req: Request) -> (Request, Value) {
    if known_empty(req.body()) {
        return (req, Value::String(String::new()));
    }

    let kind = BodyKind::from_headers(req.headers());
    if let Some(placeholder) = kind.placeholder() {
        return (req, Value::String(placeholder.to_string()));
    }

    let (parts, body) = req.into_parts();
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            let value = decode_request_json(&bytes);
            (Request::from_parts(parts, Body::from(bytes)), value)
        }
        Err(e) => (Request::from_parts(parts, Body::empty()), err_value(e)),
    }
}

/// Snapshot the response body, handing back a response with the same bytes.
///
/// Bodies without an exact length (streams, SSE) are passed through untouched.
pub async fn response_body(response: Response) -> (Response, Value) {
    if response.body().size_hint().exact().is_none() {
        return (response, err_value(CaptureError::Streaming));
    }

    let (parts, body) = response.into_parts();
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            let value = decode_response(&bytes);
            (Response::from_parts(parts, Body::from(bytes)), value)
        }
        Err(e) => (Response::from_parts(parts, Body::empty()), err_value(e)),
    }
}

pub fn decode_request_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::String(String::new());
    }
    parse_json(bytes, true).unwrap_or_else(err_value)
}

pub fn decode_response(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::String(String::new());
    }
    parse_json(bytes, false).unwrap_or_else(err_value)
}

fn parse_json(bytes: &[u8], trim: bool) -> Result<Value, CaptureError> {
    let text = std::str::from_utf8(bytes)?;
    let text = if trim { text.trim() } else { text };
    Ok(serde_json::from_str(text)?)
}
