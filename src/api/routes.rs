//! API route configuration.
//!
//! The tracking endpoints are served by the seamlink middleware and have
//! no entry here.

use crate::api::handlers::{health_handler, info_handler};
use crate::state::Seamlink;
use axum::{Router, routing::get};

/// Public API routes.
///
/// # Endpoints
///
/// - `GET /health`   - Sink health check
/// - `GET /api/info` - Service name, version and tracking endpoints
pub fn public_routes() -> Router<Seamlink> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/info", get(info_handler))
}
