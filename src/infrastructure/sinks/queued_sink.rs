//! Sink that decouples tracking endpoints from a slow downstream sink.

use crate::domain::events::{LinkClick, PageVisit, TrackingEvent};
use crate::domain::sink::{SinkError, TrackingSink, store_event};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, warn};

/// Number of retries after the first failed attempt.
const MAX_RETRIES: usize = 3;

/// Forwards events to a background worker over a bounded channel.
///
/// `store_*` only enqueues, so the tracking endpoint answers as soon as the
/// event is buffered. The worker delivers to the wrapped sink with
/// exponential backoff; events that still fail are logged and dropped.
///
/// A full queue is reported as [`SinkError::Unavailable`], which the
/// middleware turns into `500`.
#[derive(Clone)]
pub struct QueuedSink {
    tx: mpsc::Sender<TrackingEvent>,
}

impl QueuedSink {
    /// Spawns the delivery worker and returns the sink feeding it.
    ///
    /// The worker drains the queue and finishes once every clone of the
    /// sink is dropped; await the handle to flush buffered events on
    /// shutdown. Must be called from within a tokio runtime.
    pub fn spawn(inner: Arc<dyn TrackingSink>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let worker = tokio::spawn(run_sink_worker(rx, inner));
        (Self { tx }, worker)
    }

    /// Creates a sink over an existing channel without spawning a worker.
    pub fn from_sender(tx: mpsc::Sender<TrackingEvent>) -> Self {
        Self { tx }
    }

    fn enqueue(&self, event: TrackingEvent) -> Result<(), SinkError> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(ev) => {
                warn!(kind = ev.kind(), "Tracking queue full, event dropped");
                SinkError::Unavailable("tracking queue is full".to_string())
            }
            TrySendError::Closed(_) => {
                SinkError::Unavailable("tracking worker stopped".to_string())
            }
        })
    }
}

#[async_trait]
impl TrackingSink for QueuedSink {
    async fn store_click(&self, click: LinkClick) -> Result<(), SinkError> {
        self.enqueue(click.into())
    }

    async fn store_visit(&self, visit: PageVisit) -> Result<(), SinkError> {
        self.enqueue(visit.into())
    }

    async fn health_check(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Delivers queued events to `sink` until every sender is dropped.
pub async fn run_sink_worker(mut rx: mpsc::Receiver<TrackingEvent>, sink: Arc<dyn TrackingSink>) {
    while let Some(event) = rx.recv().await {
        let kind = event.kind();
        let sink_ref: &dyn TrackingSink = sink.as_ref();

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(std::time::Duration::from_secs(1))
            .map(jitter)
            .take(MAX_RETRIES);

        match Retry::spawn(strategy, || store_event(sink_ref, event.clone())).await {
            Ok(()) => debug!(kind, url = event.url(), "Queued event delivered"),
            Err(e) => error!(kind, url = event.url(), error = %e, "Dropping event after retries"),
        }
    }

    debug!("Tracking queue closed, worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sink::MockTrackingSink;
    use chrono::Utc;

    fn click() -> LinkClick {
        LinkClick {
            url: "https://example.com".to_string(),
            referrer: "https://mysite.com".to_string(),
            user_agent: "test-agent".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_enqueue_sends_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let sink = QueuedSink::from_sender(tx);
        let sent = click();

        sink.store_click(sent.clone()).await.unwrap();

        assert_eq!(rx.try_recv().unwrap(), TrackingEvent::LinkClick(sent));
    }

    #[tokio::test]
    async fn test_full_queue_is_unavailable() {
        let (tx, _rx) = mpsc::channel(1);
        let sink = QueuedSink::from_sender(tx);

        sink.store_click(click()).await.unwrap();
        let result = sink.store_click(click()).await;

        assert!(matches!(result, Err(SinkError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_closed_queue_is_unhealthy() {
        let (tx, rx) = mpsc::channel(1);
        let sink = QueuedSink::from_sender(tx);
        drop(rx);

        assert!(!sink.health_check().await);
        assert!(sink.store_click(click()).await.is_err());
    }

    #[tokio::test]
    async fn test_worker_retries_until_success() {
        let mut mock = MockTrackingSink::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_store_click()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(SinkError::Storage("transient".to_string())));
        mock.expect_store_click()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(4);
        tx.send(click().into()).await.unwrap();
        drop(tx);

        run_sink_worker(rx, Arc::new(mock)).await;
    }

    #[tokio::test]
    async fn test_spawned_worker_drains_queue_after_sink_dropped() {
        let mut mock = MockTrackingSink::new();
        mock.expect_store_click().times(3).returning(|_| Ok(()));

        let (sink, worker) = QueuedSink::spawn(Arc::new(mock), 8);
        for _ in 0..3 {
            sink.store_click(click()).await.unwrap();
        }
        drop(sink);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_retries() {
        let mut mock = MockTrackingSink::new();
        mock.expect_store_visit()
            .times(MAX_RETRIES + 1)
            .returning(|_| Err(SinkError::Storage("down".to_string())));

        let visit = PageVisit {
            url: "https://mysite.com".to_string(),
            referrer: "direct".to_string(),
            user_agent: String::new(),
            timestamp: Utc::now(),
        };

        let (tx, rx) = mpsc::channel(4);
        tx.send(visit.into()).await.unwrap();
        drop(tx);

        run_sink_worker(rx, Arc::new(mock)).await;
    }
}
