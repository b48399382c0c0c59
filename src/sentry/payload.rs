//! Sentry event wire format, reduced to the subset this crate emits.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use uuid::Uuid;

use super::stacktrace::Frame;
use crate::logger::{Fields, Record};

/// One event as POSTed to the store endpoint.
#[derive(Debug, Serialize)]
pub(super) struct Event {
    pub event_id: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub level: &'static str,
    pub message: String,
    pub platform: &'static str,
    pub sdk: SdkInfo,
    /// The record's structured fields. Everything that varies between
    /// occurrences belongs here, keeping the message stable for grouping.
    pub extra: Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<Stacktrace>,
}

#[derive(Debug, Serialize)]
pub(super) struct SdkInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct Stacktrace {
    pub frames: Vec<Frame>,
}

impl Event {
    /// Build an event from a record, optionally carrying a stack trace.
    pub(super) fn from_record(record: &Record<'_>, frames: Option<Vec<Frame>>) -> Event {
        Event {
            event_id: Uuid::new_v4().simple().to_string(),
            timestamp: unix_timestamp(),
            level: record.severity.as_str(),
            message: record.message.to_string(),
            platform: "rust",
            sdk: SdkInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            extra: record.fields.clone(),
            stacktrace: frames.map(|frames| Stacktrace { frames }),
        }
    }
}

fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}
