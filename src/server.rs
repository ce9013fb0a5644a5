//! HTTP server initialization and runtime setup.
//!
//! Builds the configured sink, wraps the demo router with the seamlink
//! middleware and runs the Axum server until Ctrl+C.

use crate::config::{Config, SinkKind};
use crate::domain::sink::TrackingSink;
use crate::infrastructure::sinks::{LogSink, NullSink, QueuedSink};
use crate::routes::app_router;
use crate::state::{Seamlink, TrackingConfig};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Builds the sink selected by `config`, plus the queued sink's worker handle.
///
/// Must be called from within a tokio runtime: the queued sink spawns its
/// delivery worker immediately.
pub fn build_sink(config: &Config) -> (Arc<dyn TrackingSink>, Option<JoinHandle<()>>) {
    match config.sink {
        SinkKind::Log => {
            tracing::info!("Sink: log");
            (Arc::new(LogSink), None)
        }
        SinkKind::Null => {
            tracing::info!("Sink: null (events discarded)");
            (Arc::new(NullSink::new()), None)
        }
        SinkKind::Queued => {
            let (sink, worker) = QueuedSink::spawn(Arc::new(LogSink), config.queue_capacity);
            tracing::info!("Sink: queued, delivery worker started");
            (Arc::new(sink), Some(worker))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (sink, worker) = build_sink(&config);
    let tracking = TrackingConfig::new(sink)
        .with_excluded_domains(&config.excluded_domains)
        .with_max_body_bytes(config.max_body_bytes);

    let state = Seamlink::new(tracking);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router, and with it the last sink sender, is gone once serve returns.
    if let Some(worker) = worker {
        tracing::info!("Flushing queued tracking events");
        if let Err(e) = worker.await {
            tracing::error!("Tracking worker failed: {}", e);
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
