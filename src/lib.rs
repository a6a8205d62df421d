pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod telemetry;
