//! Tracking event models decoded from browser reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use validator::{Validate, ValidationErrors};

/// A page load reported by the injected script.
///
/// `referrer` is `"direct"` when the browser had no referrer; both
/// `referrer` and `user_agent` default to an empty string ("unknown")
/// when absent from the payload. A missing or `null` `timestamp` becomes
/// the time the report was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageVisit {
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default = "Utc::now", deserialize_with = "timestamp_or_now")]
    pub timestamp: DateTime<Utc>,
}

/// An outbound link click, reported before the browser navigates away.
///
/// `referrer` holds the page the link was clicked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkClick {
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default = "Utc::now", deserialize_with = "timestamp_or_now")]
    pub timestamp: DateTime<Utc>,
}

fn timestamp_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?.unwrap_or_else(Utc::now))
}

/// Either kind of tracking event.
///
/// Used where both kinds travel through the same channel, such as the
/// queued sink worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingEvent {
    PageVisit(PageVisit),
    LinkClick(LinkClick),
}

impl TrackingEvent {
    /// Target URL of the event.
    pub fn url(&self) -> &str {
        match self {
            Self::PageVisit(visit) => &visit.url,
            Self::LinkClick(click) => &click.url,
        }
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PageVisit(_) => "pageview",
            Self::LinkClick(_) => "click",
        }
    }
}

impl From<PageVisit> for TrackingEvent {
    fn from(visit: PageVisit) -> Self {
        Self::PageVisit(visit)
    }
}

impl From<LinkClick> for TrackingEvent {
    fn from(click: LinkClick) -> Self {
        Self::LinkClick(click)
    }
}

/// Reasons a tracking payload could not be turned into an event.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Decodes and validates a raw JSON body into a tracking event.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if the body is not valid JSON of the
/// expected shape, and [`DecodeError::Invalid`] if it decodes but breaks
/// an event invariant (for example an empty `url`).
pub fn decode_event<T>(body: &[u8]) -> Result<T, DecodeError>
where
    T: DeserializeOwned + Validate,
{
    let event: T = serde_json::from_slice(body)?;
    event.validate()?;
    Ok(event)
}
