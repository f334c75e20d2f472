//! Canonical calendar event types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A calendar event (provider-neutral)
///
/// Timestamps are naive: the wall-clock value the provider sent, without
/// its offset. Missing text fields are empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    /// The provider's original `dateTime` string for the start, absent for all-day events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_precise: Option<String>,
}

/// An event to be created on the calendar provider
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub summary: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: Option<String>,
}

impl EventDraft {
    pub fn new(summary: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        EventDraft {
            summary: summary.into(),
            description: None,
            start,
            end,
            location: None,
        }
    }
}
