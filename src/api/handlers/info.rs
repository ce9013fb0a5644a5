//! Handler for service info endpoint.

use axum::Json;

use crate::api::dto::info::InfoResponse;
use crate::api::handlers::track::{CLICK_PATH, PAGEVIEW_PATH};

/// Describes the service and its tracking endpoints.
///
/// # Endpoint
///
/// `GET /api/info`
///
/// The response is JSON, so the middleware never injects into it.
pub async fn info_handler() -> Json<InfoResponse> {
    Json(InfoResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        pageview_endpoint: PAGEVIEW_PATH,
        click_endpoint: CLICK_PATH,
    })
}
