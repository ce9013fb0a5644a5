//! Closure-backed sink.

use crate::domain::events::{LinkClick, PageVisit};
use crate::domain::sink::{SinkError, TrackingSink};
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by sink callbacks.
pub type SinkFuture = Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send>>;

type Callback<E> = Box<dyn Fn(E) -> SinkFuture + Send + Sync>;

/// A sink built from two optional async callbacks.
///
/// Either callback may be left unset; invoking an unset callback is a
/// no-op success, never a fault.
///
/// # Example
///
/// ```rust,ignore
/// let sink = FnSink::new()
///     .on_link_click(|click| async move {
///         println!("clicked {}", click.url);
///         Ok(())
///     });
/// ```
#[derive(Default)]
pub struct FnSink {
    on_link_click: Option<Callback<LinkClick>>,
    on_page_visit: Option<Callback<PageVisit>>,
}

impl FnSink {
    /// Creates a sink with no callbacks set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback invoked for each link click.
    pub fn on_link_click<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(LinkClick) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SinkError>> + Send + 'static,
    {
        self.on_link_click = Some(Box::new(move |click| Box::pin(callback(click))));
        self
    }

    /// Sets the callback invoked for each page visit.
    pub fn on_page_visit<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(PageVisit) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SinkError>> + Send + 'static,
    {
        self.on_page_visit = Some(Box::new(move |visit| Box::pin(callback(visit))));
        self
    }
}

#[async_trait]
impl TrackingSink for FnSink {
    async fn store_click(&self, click: LinkClick) -> Result<(), SinkError> {
        match &self.on_link_click {
            Some(callback) => callback(click).await,
            None => Ok(()),
        }
    }

    async fn store_visit(&self, visit: PageVisit) -> Result<(), SinkError> {
        match &self.on_page_visit {
            Some(callback) => callback(visit).await,
            None => Ok(()),
        }
    }
}
