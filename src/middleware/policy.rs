// src/middleware/policy.rs
use crate::config::InterceptorConfig;

/// Only paths containing this pattern get their bodies and timing logged.
pub const API_PATTERN: &str = "/api/";

/// Paths exempted from body/timing capture even when they match [`API_PATTERN`].
pub const EXCLUDE_REQUEST_PATHS: &[&str] = &[
    "/v1/user_identifiers/household_logs/",
    "/v1/ip/",
    "/v1/health/",
    "/v1/inventories/retool/",
];

/// Decides which requests get a request/response record.
#[derive(Debug, Clone)]
pub struct LogPolicy {
    include_pattern: String,
    exclude_paths: Vec<String>,
}

impl LogPolicy {
    pub fn new(include_pattern: impl Into<String>, exclude_paths: Vec<String>) -> Self {
        Self {
            include_pattern: include_pattern.into(),
            exclude_paths,
        }
    }

    /// `path` is the full path including the query string.
    pub fn is_logged(&self, path: &str) -> bool {
        path.contains(self.include_pattern.as_str())
            && !self
                .exclude_paths
                .iter()
                .any(|excluded| path.contains(excluded.as_str()))
    }
}

impl Default for LogPolicy {
    fn default() -> Self {
        Self::new(
            API_PATTERN,
            EXCLUDE_REQUEST_PATHS.iter().map(|p| p.to_string()).collect(),
        )
    }
}

impl From<&InterceptorConfig> for LogPolicy {
    fn from(cfg: &InterceptorConfig) -> Self {
        Self::new(cfg.include_pattern.clone(), cfg.exclude_paths.clone())
    }
}
