//! Provider-native JSON shapes.
//!
//! These mirror the fields calbridge reads from (and writes to) the Google
//! Calendar v3 and Todoist REST v2 APIs. Everything else in a reply is
//! ignored. Mapping into canonical records lives in [`crate::convert`].

use serde::{Deserialize, Serialize};

// =============================================================================
// Google Calendar
// =============================================================================

/// An event as returned by (or sent to) Google Calendar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<RawEventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<RawEventTime>,
}

/// Google's `EventDateTime`: either a precise `dateTime` or an all-day `date`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Body of an `events.list` reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEventList {
    #[serde(default)]
    pub items: Vec<RawEvent>,
}

// =============================================================================
// Todoist
// =============================================================================

/// A task as returned by Todoist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<RawDue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

/// Todoist's nested due object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
}
