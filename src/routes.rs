//! Top-level router configuration for the demo server.
//!
//! # Route Structure
//!
//! - `GET  /`                       - Tracked demo page
//! - `GET  /ref`                    - Referrer demo page
//! - `GET  /health`                 - Sink health check
//! - `GET  /api/info`               - Service info (JSON, never injected)
//! - `POST /api/seamlink/pageview`  - Page visit report (handled by middleware)
//! - `POST /api/seamlink/track`     - Click report (handled by middleware)
//!
//! # Middleware (outermost first)
//!
//! - **Path normalization** - Trailing slash handling
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Seamlink** - Tracking endpoints and script injection

use crate::api;
use crate::api::middleware::{rate_limit, seamlink, tracing};
use crate::state::Seamlink;
use crate::web;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the demo application router.
///
/// # Arguments
///
/// - `state` - shared middleware state, also injected into the health handler
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: Seamlink, behind_proxy: bool) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(web::routes::public_routes())
        .merge(api::routes::public_routes())
        .with_state(state.clone());

    let router = seamlink::attach(router, state);

    let router = if behind_proxy {
        router.layer(rate_limit::proxied_layer())
    } else {
        router.layer(rate_limit::layer())
    };

    let router = router.layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
