//! Sink that writes tracking events to the application log.

use crate::domain::events::{LinkClick, PageVisit};
use crate::domain::sink::{SinkError, TrackingSink};
use async_trait::async_trait;
use tracing::info;

/// Logs every event at `INFO` with its fields as structured values.
///
/// Useful during development and as the demo server's default sink.
///
/// # Example Logs
///
/// ```text
/// INFO seamlink::infrastructure::sinks::log_sink: Outbound click url=https://github.com from=http://localhost:3000/ user_agent=Mozilla/5.0
/// INFO seamlink::infrastructure::sinks::log_sink: Page visit url=http://localhost:3000/ from=direct user_agent=Mozilla/5.0
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl TrackingSink for LogSink {
    async fn store_click(&self, click: LinkClick) -> Result<(), SinkError> {
        info!(
            url = %click.url,
            from = %click.referrer,
            user_agent = %click.user_agent,
            at = %click.timestamp,
            "Outbound click"
        );
        Ok(())
    }

    async fn store_visit(&self, visit: PageVisit) -> Result<(), SinkError> {
        info!(
            url = %visit.url,
            from = %visit.referrer,
            user_agent = %visit.user_agent,
            at = %visit.timestamp,
            "Page visit"
        );
        Ok(())
    }
}
