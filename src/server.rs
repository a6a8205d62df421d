// src/server.rs
use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::config::Config;
use crate::error::Result;
use crate::handlers::echo::{echo, trigger_panic};
use crate::handlers::health::{health_check, version};
use crate::middleware::{request_logger, LogPolicy};

/// Build application router
pub fn build_router(policy: LogPolicy) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/version", get(version))
        .route("/api/echo", post(echo))
        .route("/api/panic", get(trigger_panic))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn_with_state(
                    Arc::new(policy),
                    request_logger,
                )),
        )
}

/// Bind and serve until Ctrl+C / SIGTERM.
pub async fn run(cfg: &Config) -> Result<()> {
    let app = build_router(LogPolicy::from(&cfg.interceptor));

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!(%addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install terminate signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    tracing::info!("Shutdown signal received");
}
