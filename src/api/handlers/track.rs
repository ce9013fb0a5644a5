//! Handlers for the reserved tracking endpoints.
//!
//! These are not mounted as routes: [`crate::api::middleware::seamlink::layer`]
//! calls them directly when a request path matches, so the request never
//! reaches the rest of the pipeline.

use axum::{body::Body, http::StatusCode};
use serde_json::json;
use tracing::{error, info, warn};

use crate::application::services::Dispatch;
use crate::domain::events::{LinkClick, PageVisit, decode_event};
use crate::error::AppError;
use crate::state::Seamlink;

/// Path the injected script posts page visits to.
pub const PAGEVIEW_PATH: &str = "/api/seamlink/pageview";

/// Path the injected script posts outbound clicks to.
pub const CLICK_PATH: &str = "/api/seamlink/track";

/// Records an outbound link click.
///
/// # Endpoint
///
/// `POST /api/seamlink/track`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "referrer": "https://mysite.com/page",
///   "userAgent": "Mozilla/5.0",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is unreadable, not valid JSON, or has
/// an empty `url`; the sink is not called.
/// Returns 500 Internal Server Error if the sink fails.
pub async fn click_handler(state: &Seamlink, body: Body) -> Result<StatusCode, AppError> {
    let bytes = read_body(body, state.max_body_bytes, "Invalid click data").await?;

    let click: LinkClick = decode_event(&bytes).map_err(|e| {
        warn!(error = %e, "Rejected click payload");
        metrics::counter!("seamlink_events_total", "kind" => "click", "outcome" => "rejected")
            .increment(1);
        AppError::bad_request("Invalid click data", json!({ "reason": e.to_string() }))
    })?;

    let url = click.url.clone();
    match state.tracking_service.record_click(click).await {
        Ok(dispatch) => {
            info!(url = %url, excluded = dispatch == Dispatch::Excluded, "Click processed");
            metrics::counter!("seamlink_events_total", "kind" => "click", "outcome" => outcome(dispatch))
                .increment(1);
            Ok(StatusCode::OK)
        }
        Err(e) => {
            error!(url = %url, error = %e, "Failed to store click");
            metrics::counter!("seamlink_events_total", "kind" => "click", "outcome" => "failed")
                .increment(1);
            Err(AppError::internal("Failed to store click data", json!({})))
        }
    }
}

/// Records a page visit.
///
/// # Endpoint
///
/// `POST /api/seamlink/pageview`
///
/// # Request Body
///
/// Same shape as the click endpoint; `referrer` is `"direct"` when the
/// browser reported none.
///
/// # Errors
///
/// Returns 400 Bad Request for unreadable or invalid payloads.
/// Returns 500 Internal Server Error if the sink fails.
pub async fn pageview_handler(state: &Seamlink, body: Body) -> Result<StatusCode, AppError> {
    let bytes = read_body(body, state.max_body_bytes, "Invalid pageview data").await?;

    let visit: PageVisit = decode_event(&bytes).map_err(|e| {
        warn!(error = %e, "Rejected pageview payload");
        metrics::counter!("seamlink_events_total", "kind" => "pageview", "outcome" => "rejected")
            .increment(1);
        AppError::bad_request("Invalid pageview data", json!({ "reason": e.to_string() }))
    })?;

    let url = visit.url.clone();
    match state.tracking_service.record_visit(visit).await {
        Ok(dispatch) => {
            info!(url = %url, excluded = dispatch == Dispatch::Excluded, "Pageview processed");
            metrics::counter!("seamlink_events_total", "kind" => "pageview", "outcome" => outcome(dispatch))
                .increment(1);
            Ok(StatusCode::OK)
        }
        Err(e) => {
            error!(url = %url, error = %e, "Failed to store pageview");
            metrics::counter!("seamlink_events_total", "kind" => "pageview", "outcome" => "failed")
                .increment(1);
            Err(AppError::internal("Failed to store pageview data", json!({})))
        }
    }
}

async fn read_body(
    body: Body,
    limit: usize,
    message: &'static str,
) -> Result<axum::body::Bytes, AppError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        warn!(error = %e, "Failed to read tracking payload");
        AppError::bad_request(message, json!({ "reason": "unreadable or oversized body" }))
    })
}

fn outcome(dispatch: Dispatch) -> &'static str {
    match dispatch {
        Dispatch::Stored => "stored",
        Dispatch::Excluded => "excluded",
    }
}
