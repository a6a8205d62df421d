use thiserror::Error;

/// Errors raised while starting or configuring the service.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while snapshotting a request or response body.
///
/// These never leave the logging middleware. `Display` is the bare
/// description so it can be embedded in the log payload as `err - <msg>`.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("{0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Body(#[from] axum::Error),

    #[error("streaming response body not captured")]
    Streaming,
}

pub type Result<T> = std::result::Result<T, AppError>;
