//! Dispatch of decoded tracking events to the configured sink.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::events::{LinkClick, PageVisit};
use crate::domain::sink::{SinkError, TrackingSink};
use crate::utils::extract_domain::is_excluded_url;
use tracing::debug;

/// What happened to an event handed to [`TrackingService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The sink accepted the event.
    Stored,
    /// The event targets an excluded domain and was not forwarded.
    Excluded,
}

/// Service applying the exclusion list before forwarding events.
///
/// Holds no mutable state; one instance is shared by every request.
pub struct TrackingService {
    sink: Arc<dyn TrackingSink>,
    excluded_domains: Arc<HashSet<String>>,
}

impl TrackingService {
    /// Creates a new tracking service.
    ///
    /// `excluded_domains` must already be normalized with
    /// [`crate::utils::extract_domain::normalize_domain`].
    pub fn new(sink: Arc<dyn TrackingSink>, excluded_domains: Arc<HashSet<String>>) -> Self {
        Self {
            sink,
            excluded_domains,
        }
    }

    /// Forwards a link click to the sink unless its target is excluded.
    ///
    /// # Errors
    ///
    /// Returns the sink's [`SinkError`] unchanged.
    pub async fn record_click(&self, click: LinkClick) -> Result<Dispatch, SinkError> {
        if is_excluded_url(&click.url, &self.excluded_domains) {
            debug!(url = %click.url, "Click targets excluded domain, skipping");
            return Ok(Dispatch::Excluded);
        }

        self.sink.store_click(click).await?;
        Ok(Dispatch::Stored)
    }

    /// Forwards a page visit to the sink unless the page is excluded.
    ///
    /// # Errors
    ///
    /// Returns the sink's [`SinkError`] unchanged.
    pub async fn record_visit(&self, visit: PageVisit) -> Result<Dispatch, SinkError> {
        if is_excluded_url(&visit.url, &self.excluded_domains) {
            debug!(url = %visit.url, "Visit on excluded domain, skipping");
            return Ok(Dispatch::Excluded);
        }

        self.sink.store_visit(visit).await?;
        Ok(Dispatch::Stored)
    }

    /// Reports whether the underlying sink is healthy.
    pub async fn sink_healthy(&self) -> bool {
        self.sink.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sink::MockTrackingSink;
    use chrono::Utc;

    fn click(url: &str) -> LinkClick {
        LinkClick {
            url: url.to_string(),
            referrer: "https://mysite.com".to_string(),
            user_agent: "test-agent".to_string(),
            timestamp: Utc::now(),
        }
    }

    fn visit(url: &str) -> PageVisit {
        PageVisit {
            url: url.to_string(),
            referrer: "direct".to_string(),
            user_agent: "test-agent".to_string(),
            timestamp: Utc::now(),
        }
    }

    fn excluded(domains: &[&str]) -> Arc<HashSet<String>> {
        Arc::new(domains.iter().map(|d| d.to_string()).collect())
    }

    #[tokio::test]
    async fn test_record_click_stores() {
        let mut mock_sink = MockTrackingSink::new();
        let expected = click("https://example.com");
        let want = expected.clone();

        mock_sink
            .expect_store_click()
            .times(1)
            .withf(move |c| *c == want)
            .returning(|_| Ok(()));

        let service = TrackingService::new(Arc::new(mock_sink), excluded(&[]));

        let result = service.record_click(expected).await;

        assert_eq!(result, Ok(Dispatch::Stored));
    }

    #[tokio::test]
    async fn test_record_click_excluded_domain() {
        let mut mock_sink = MockTrackingSink::new();
        mock_sink.expect_store_click().never();

        let service = TrackingService::new(
            Arc::new(mock_sink),
            excluded(&["internal.example.com"]),
        );

        let result = service
            .record_click(click("https://wiki.internal.example.com/page"))
            .await;

        assert_eq!(result, Ok(Dispatch::Excluded));
    }

    #[tokio::test]
    async fn test_record_click_sink_failure() {
        let mut mock_sink = MockTrackingSink::new();
        mock_sink
            .expect_store_click()
            .times(1)
            .returning(|_| Err(SinkError::Storage("connection reset".to_string())));

        let service = TrackingService::new(Arc::new(mock_sink), excluded(&[]));

        let result = service.record_click(click("https://example.com")).await;

        assert!(matches!(result, Err(SinkError::Storage(_))));
    }

    #[tokio::test]
    async fn test_record_visit_stores() {
        let mut mock_sink = MockTrackingSink::new();
        mock_sink
            .expect_store_visit()
            .times(1)
            .withf(|v| v.url == "https://mysite.com/" && v.referrer == "direct")
            .returning(|_| Ok(()));

        let service = TrackingService::new(Arc::new(mock_sink), excluded(&["other.com"]));

        let result = service.record_visit(visit("https://mysite.com/")).await;

        assert_eq!(result, Ok(Dispatch::Stored));
    }

    #[tokio::test]
    async fn test_record_visit_excluded_domain() {
        let mut mock_sink = MockTrackingSink::new();
        mock_sink.expect_store_visit().never();

        let service = TrackingService::new(Arc::new(mock_sink), excluded(&["mysite.com"]));

        let result = service.record_visit(visit("https://mysite.com/")).await;

        assert_eq!(result, Ok(Dispatch::Excluded));
    }

    #[tokio::test]
    async fn test_sink_healthy() {
        let mut mock_sink = MockTrackingSink::new();
        mock_sink.expect_health_check().times(1).returning(|| false);

        let service = TrackingService::new(Arc::new(mock_sink), excluded(&[]));

        assert!(!service.sink_healthy().await);
    }
}
