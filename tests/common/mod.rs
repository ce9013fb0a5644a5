#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use seamlink::api::middleware::seamlink::attach;
use seamlink::domain::events::{LinkClick, PageVisit};
use seamlink::domain::sink::{SinkError, TrackingSink};
use seamlink::state::{Seamlink, TrackingConfig};
use std::sync::{Arc, Mutex};

pub const CLICK_JSON: &str = r#"{"url":"https://example.com","referrer":"https://mysite.com","userAgent":"test-agent","timestamp":"2024-01-01T00:00:00Z"}"#;

pub const VISIT_JSON: &str = r#"{"url":"https://mysite.com/","referrer":"direct","userAgent":"test-agent","timestamp":"2024-01-01T00:00:00Z"}"#;

/// Sink that remembers everything it was given.
#[derive(Default)]
pub struct RecordingSink {
    pub clicks: Mutex<Vec<LinkClick>>,
    pub visits: Mutex<Vec<PageVisit>>,
    pub fail_with: Option<SinkError>,
}

impl RecordingSink {
    pub fn failing(error: SinkError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    pub fn clicks(&self) -> Vec<LinkClick> {
        self.clicks.lock().unwrap().clone()
    }

    pub fn visits(&self) -> Vec<PageVisit> {
        self.visits.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackingSink for RecordingSink {
    async fn store_click(&self, click: LinkClick) -> Result<(), SinkError> {
        self.clicks.lock().unwrap().push(click);
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn store_visit(&self, visit: PageVisit) -> Result<(), SinkError> {
        self.visits.lock().unwrap().push(visit);
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// Wraps `router` with the middleware backed by `sink` and starts a test server.
pub fn create_test_server(router: Router, config: TrackingConfig) -> TestServer {
    let app = attach(router, Seamlink::new(config));
    TestServer::new(app).unwrap()
}

pub fn recording_config(sink: Arc<RecordingSink>) -> TrackingConfig {
    TrackingConfig::new(sink)
}
