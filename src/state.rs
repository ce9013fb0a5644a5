//! Middleware configuration and the shared state built from it.

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::services::TrackingService;
use crate::domain::sink::TrackingSink;
use crate::infrastructure::sinks::NullSink;
use crate::utils::extract_domain::normalize_domain;

/// Default upper bound for bodies buffered by the middleware (8 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Configuration supplied once when the middleware is built.
///
/// Read-only afterwards: [`Seamlink`] moves it behind an `Arc` and shares it
/// across all requests without locking.
#[derive(Clone)]
pub struct TrackingConfig {
    /// Destination for click and visit events.
    pub sink: Arc<dyn TrackingSink>,
    /// Domains whose events are accepted but never forwarded to the sink.
    /// Subdomains are matched too.
    pub excluded_domains: HashSet<String>,
    /// Largest tracking payload or HTML body the middleware will buffer.
    pub max_body_bytes: usize,
}

impl TrackingConfig {
    /// Creates a configuration around `sink` with no exclusions.
    pub fn new(sink: Arc<dyn TrackingSink>) -> Self {
        Self {
            sink,
            excluded_domains: HashSet::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Adds domains to the exclusion list.
    pub fn with_excluded_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_domains
            .extend(domains.into_iter().filter_map(|d| normalize_domain(d.as_ref())));
        self
    }

    /// Overrides the body buffering limit.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::new(Arc::new(NullSink::new()))
    }
}

/// Shared middleware state, cheap to clone.
///
/// Build with [`Seamlink::new`] from a [`TrackingConfig`], or use
/// [`Seamlink::default`] for a no-op sink and an empty exclusion list.
#[derive(Clone)]
pub struct Seamlink {
    pub tracking_service: Arc<TrackingService>,
    pub max_body_bytes: usize,
}

impl Seamlink {
    /// Builds the middleware state from `config`, used verbatim.
    pub fn new(config: TrackingConfig) -> Self {
        // Entries inserted directly into the public field skip normalization.
        let excluded: HashSet<String> = config
            .excluded_domains
            .iter()
            .filter_map(|d| normalize_domain(d))
            .collect();

        Self {
            tracking_service: Arc::new(TrackingService::new(config.sink, Arc::new(excluded))),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl Default for Seamlink {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackingConfig::default();

        assert!(config.excluded_domains.is_empty());
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_with_excluded_domains_normalizes() {
        let config = TrackingConfig::default()
            .with_excluded_domains(["Internal.Example.com", "*.corp.local", "  "]);

        assert_eq!(config.excluded_domains.len(), 2);
        assert!(config.excluded_domains.contains("internal.example.com"));
        assert!(config.excluded_domains.contains("corp.local"));
    }

    #[tokio::test]
    async fn test_seamlink_default_sink_is_healthy() {
        let seamlink = Seamlink::default();

        assert!(seamlink.tracking_service.sink_healthy().await);
        assert_eq!(seamlink.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }
}
