//! No-op sink used when tracking is not configured.

use crate::domain::sink::TrackingSink;
use async_trait::async_trait;
use tracing::debug;

/// A sink that accepts every event and stores nothing.
///
/// Default sink of [`crate::state::TrackingConfig`]. All calls succeed
/// immediately, so the tracking endpoints answer `200` without side effects.
pub struct NullSink;

impl NullSink {
    /// Creates a new NullSink instance.
    pub fn new() -> Self {
        debug!("Using NullSink (tracking events are discarded)");
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackingSink for NullSink {}
