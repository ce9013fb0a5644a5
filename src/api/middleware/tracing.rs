//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates the request tracing layer for the demo server.
///
/// Every request gets an `INFO` span carrying method, URI and version.
/// Request starts are logged at `DEBUG`, completions at `INFO` with status
/// and latency in milliseconds, and 5xx responses (including sink failures
/// on the tracking endpoints) at `ERROR`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/api/seamlink/track version=HTTP/1.1}: finished processing request latency=3 ms status=200
/// ERROR request{method=POST uri=/api/seamlink/pageview version=HTTP/1.1}: response failed classification=Status code: 500 Internal Server Error latency=1 ms
/// ```
///
/// Apply it outside the seamlink middleware so the tracking endpoints,
/// which never reach a route, are traced as well.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
