// src/config.rs
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::policy::{API_PATTERN, EXCLUDE_REQUEST_PATHS};

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "reqreslog=debug,tower_http=warn".
    #[serde(default = "default_level")]
    pub level: String,
}

/// Which routes get their bodies and timing logged.
#[derive(Debug, Deserialize, Clone)]
pub struct InterceptorConfig {
    #[serde(default = "default_include_pattern")]
    pub include_pattern: String,
    #[serde(default = "default_exclude_paths")]
    pub exclude_paths: Vec<String>,
}

/// Global configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub interceptor: InterceptorConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".to_string()
}

fn default_include_pattern() -> String {
    API_PATTERN.to_string()
}

fn default_exclude_paths() -> Vec<String> {
    EXCLUDE_REQUEST_PATHS.iter().map(|p| p.to_string()).collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            include_pattern: default_include_pattern(),
            exclude_paths: default_exclude_paths(),
        }
    }
}

impl Config {
    /// Load config from `config/default.*` and environment variables
    pub fn from_env() -> Result<Self> {
        Self::load("config/default")
    }

    /// Load config from `path` (optional, any format `config` understands),
    /// then `APP__SECTION__KEY` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("interceptor.exclude_paths")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        Ok(cfg)
    }
}
