//! Tracking middleware: reserved-path dispatch and script injection.

use axum::{
    Router,
    body::{Body, Bytes, HttpBody},
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use futures_util::{StreamExt, stream};
use serde_json::json;
use tracing::{debug, error};

use crate::api::handlers::track::{CLICK_PATH, PAGEVIEW_PATH, click_handler, pageview_handler};
use crate::error::AppError;
use crate::state::Seamlink;
use crate::utils::html_injector::{inject_script_bytes, is_encoded, is_html};
use crate::utils::tracking_script::TRACKING_SCRIPT;

/// Intercepts tracking reports and injects the tracking script into HTML.
///
/// # Request Flow
///
/// 1. Path equals `/api/seamlink/track` or `/api/seamlink/pageview`:
///    the payload is handled here and the request goes no further
/// 2. Otherwise the request runs through the rest of the pipeline
/// 3. An HTML response containing `</body>` gets [`TRACKING_SCRIPT`]
///    inserted before the first closing tag
///
/// # Pass-through
///
/// The downstream response is returned untouched when it is not
/// `text/html`, is content-encoded, is larger than `max_body_bytes`, is
/// not UTF-8, or has no `</body>`. A streamed body that only turns out to
/// be too large while buffering is replayed as received.
///
/// # Errors
///
/// Tracking endpoints answer `400` for bad payloads and `500` for sink
/// failures. A downstream HTML body that fails to stream yields `500`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use seamlink::api::middleware::seamlink;
///
/// let app = Router::new()
///     .route("/", get(index))
///     .layer(middleware::from_fn_with_state(Seamlink::default(), seamlink::layer));
/// ```
pub async fn layer(
    State(st): State<Seamlink>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    debug!(path, "Seamlink middleware");

    if path == CLICK_PATH {
        let status = click_handler(&st, req.into_body()).await?;
        return Ok(status.into_response());
    }

    if path == PAGEVIEW_PATH {
        let status = pageview_handler(&st, req.into_body()).await?;
        return Ok(status.into_response());
    }

    let response = next.run(req).await;

    inject_into_response(response, st.max_body_bytes).await
}

/// Wraps every route of `router`, including its fallback, with [`layer`].
///
/// The tracking endpoints need no route of their own.
pub fn attach<S>(router: Router<S>, seamlink: Seamlink) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(seamlink, layer))
}

async fn inject_into_response(response: Response, limit: usize) -> Result<Response, AppError> {
    if !is_html(response.headers()) || is_encoded(response.headers()) {
        return Ok(response);
    }

    if declared_len(response.headers(), response.body()).is_some_and(|len| len > limit as u64) {
        debug!(limit, "HTML body exceeds injection limit, passing through");
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();

    let bytes = match buffer_up_to(body, limit).await {
        Ok(Buffered::Complete(bytes)) => bytes,
        Ok(Buffered::Overflow(body)) => {
            debug!(limit, "Streamed HTML body exceeds injection limit, passing through");
            return Ok(Response::from_parts(parts, body));
        }
        Err(e) => {
            error!(error = %e, "Failed to buffer HTML response");
            return Err(AppError::internal("Failed to read response body", json!({})));
        }
    };

    match inject_script_bytes(&bytes, TRACKING_SCRIPT) {
        Some(modified) => {
            debug!("Injecting tracking script");
            metrics::counter!("seamlink_injections_total").increment(1);
            parts.headers.remove(header::CONTENT_LENGTH);
            Ok(Response::from_parts(parts, Body::from(modified)))
        }
        None => Ok(Response::from_parts(parts, Body::from(bytes))),
    }
}

enum Buffered {
    Complete(Bytes),
    /// Limit exceeded; the body re-emits everything read so far, then the rest.
    Overflow(Body),
}

/// Reads `body` until it ends or grows past `limit` bytes.
async fn buffer_up_to(body: Body, limit: usize) -> Result<Buffered, axum::Error> {
    let mut chunks = body.into_data_stream();
    let mut buf = Vec::new();

    while let Some(chunk) = chunks.next().await {
        buf.extend_from_slice(&chunk?);
        if buf.len() > limit {
            let prefix = stream::once(async move { Ok::<_, axum::Error>(Bytes::from(buf)) });
            return Ok(Buffered::Overflow(Body::from_stream(prefix.chain(chunks))));
        }
    }

    Ok(Buffered::Complete(Bytes::from(buf)))
}

/// Body length from `Content-Length`, falling back to the body's size hint.
fn declared_len(headers: &HeaderMap, body: &Body) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| body.size_hint().upper())
}
