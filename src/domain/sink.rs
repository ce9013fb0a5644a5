//! Sink trait through which tracking events leave the middleware.

use crate::domain::events::{LinkClick, PageVisit, TrackingEvent};
use async_trait::async_trait;

/// Errors a sink may report back to the middleware.
///
/// The message is logged but never sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for tracking events.
///
/// The middleware awaits each call inline, so slow sinks slow down the
/// tracking endpoint that invoked them. Both store methods default to a
/// no-op success: an implementation that only cares about clicks can leave
/// `store_visit` out.
///
/// # Implementations
///
/// - [`crate::infrastructure::sinks::NullSink`] - discards everything
/// - [`crate::infrastructure::sinks::LogSink`] - writes events to the log
/// - [`crate::infrastructure::sinks::FnSink`] - wraps optional closures
/// - [`crate::infrastructure::sinks::QueuedSink`] - hands events to a background worker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackingSink: Send + Sync {
    /// Persists an outbound link click.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the click could not be stored; the
    /// middleware answers with `500`.
    async fn store_click(&self, _click: LinkClick) -> Result<(), SinkError> {
        Ok(())
    }

    /// Persists a page visit.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the visit could not be stored; the
    /// middleware answers with `500`.
    async fn store_visit(&self, _visit: PageVisit) -> Result<(), SinkError> {
        Ok(())
    }

    /// Reports whether the sink can currently accept events.
    async fn health_check(&self) -> bool {
        true
    }
}

/// Routes an event of either kind to the matching sink method.
pub async fn store_event(sink: &dyn TrackingSink, event: TrackingEvent) -> Result<(), SinkError> {
    match event {
        TrackingEvent::PageVisit(visit) => sink.store_visit(visit).await,
        TrackingEvent::LinkClick(click) => sink.store_click(click).await,
    }
}
