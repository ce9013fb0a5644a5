//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Requests per second replenished per client.
const PER_SECOND: u64 = 5;

/// Burst allowance per client. A page load costs one pageview plus one
/// request per clicked link, so this is sized for bursty browsing.
const BURST_SIZE: u32 = 50;

/// Creates a rate limiter keyed on the socket peer address.
///
/// # Limits
///
/// - **Rate**: 5 requests per second
/// - **Burst**: 50 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Requires `ConnectInfo<SocketAddr>`, i.e. the server must be started with
/// `into_make_service_with_connect_info`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(index))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter keyed on the client IP reported by a reverse proxy.
///
/// Reads `X-Forwarded-For`, `X-Real-IP` and `Forwarded`, falling back to the
/// peer address. Enable only behind a trusted proxy, otherwise clients can
/// pick their own key.
pub fn proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
