//! Time ranges for listing calendar events.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{CalBridgeError, CalBridgeResult};

/// The range of upcoming events considered by a sync: `[now, now + days]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SyncWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CalBridgeResult<Self> {
        if start > end {
            return Err(CalBridgeError::InvalidWindow(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(SyncWindow { start, end })
    }

    /// Window covering the next `days` days from now.
    pub fn upcoming(days: u32) -> CalBridgeResult<Self> {
        Self::upcoming_from(Utc::now(), days)
    }

    pub fn upcoming_from(now: DateTime<Utc>, days: u32) -> CalBridgeResult<Self> {
        if days == 0 {
            return Err(CalBridgeError::InvalidWindow(
                "days ahead must be a positive number".into(),
            ));
        }
        let end = Duration::try_days(days.into())
            .and_then(|span| now.checked_add_signed(span))
            .ok_or_else(|| {
                CalBridgeError::InvalidWindow(format!(
                    "{} days ahead reaches past the last representable date",
                    days
                ))
            })?;
        Self::new(now, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Parameters of a calendar listing call.
///
/// Listings always expand recurring events into single instances and order
/// them by start time.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub time_min: DateTime<Utc>,
    pub time_max: Option<DateTime<Utc>>,
    pub max_results: Option<u32>,
}

impl EventQuery {
    /// Events starting from `time_min` onwards, at most `max_results` of them.
    pub fn upcoming(time_min: DateTime<Utc>, max_results: u32) -> Self {
        EventQuery {
            time_min,
            time_max: None,
            max_results: Some(max_results),
        }
    }

    /// Query string parameters for Google's `events.list`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("timeMin", format_timestamp(self.time_min)),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];
        if let Some(time_max) = self.time_max {
            params.push(("timeMax", format_timestamp(time_max)));
        }
        if let Some(max_results) = self.max_results {
            params.push(("maxResults", max_results.to_string()));
        }
        params
    }
}

impl From<&SyncWindow> for EventQuery {
    fn from(window: &SyncWindow) -> Self {
        EventQuery {
            time_min: window.start,
            time_max: Some(window.end),
            max_results: None,
        }
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
