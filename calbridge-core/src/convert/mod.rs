//! Mapping between provider JSON shapes and canonical records.

mod from_google;
mod from_todoist;
mod to_google;
mod to_todoist;

pub use from_google::to_calendar_event;
pub use from_todoist::to_task;
pub use to_google::to_event_body;
pub use to_todoist::to_task_draft;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse an ISO-8601 timestamp into its wall-clock value.
///
/// Accepts RFC 3339 (`Z` or an explicit offset, which is dropped) as well as
/// offset-less `YYYY-MM-DDTHH:MM[:SS[.f]]`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
