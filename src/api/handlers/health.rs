//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::Seamlink;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Sink accepting events
/// - **503 Service Unavailable**: Sink unhealthy (e.g. queue worker stopped)
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "sink": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<Seamlink>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let sink_check = if state.tracking_service.sink_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Sink is not accepting events".to_string()),
        }
    };

    let healthy = sink_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { sink: sink_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
