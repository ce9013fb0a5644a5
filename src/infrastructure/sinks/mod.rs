//! Reference [`TrackingSink`](crate::domain::sink::TrackingSink) implementations.
//!
//! None of these persist anything on their own; real storage is plugged in
//! by the embedding application.
//!
//! - [`NullSink`] - discards every event (default)
//! - [`LogSink`] - writes events to the log
//! - [`FnSink`] - delegates to optional async closures
//! - [`QueuedSink`] - buffers events for a background worker with retries

mod fn_sink;
mod log_sink;
mod null_sink;
mod queued_sink;

pub use fn_sink::{FnSink, SinkFuture};
pub use log_sink::LogSink;
pub use null_sink::NullSink;
pub use queued_sink::{QueuedSink, run_sink_worker};
