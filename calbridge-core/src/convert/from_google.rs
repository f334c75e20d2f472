use chrono::{NaiveDateTime, NaiveTime};

use crate::constants::GOOGLE_PROVIDER;
use crate::convert::{parse_date, parse_timestamp};
use crate::error::{CalBridgeError, CalBridgeResult};
use crate::event::CalendarEvent;
use crate::raw::{RawEvent, RawEventTime};

/// Convert a Google event into a [`CalendarEvent`].
///
/// A missing `end` falls back to the start. An event without a usable start
/// is not well-formed.
pub fn to_calendar_event(raw: &RawEvent) -> CalBridgeResult<CalendarEvent> {
    let (start, start_precise) = match raw.start {
        Some(ref start) => event_time(start, "start")?,
        None => return Err(CalBridgeError::malformed(GOOGLE_PROVIDER, "event has no start time")),
    };

    let end = match raw.end {
        Some(ref end) => event_time(end, "end")?.0,
        None => start,
    };

    Ok(CalendarEvent {
        title: raw.summary.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        start,
        end,
        location: raw.location.clone().unwrap_or_default(),
        start_precise,
    })
}

/// Prefer `dateTime`; an all-day `date` becomes midnight.
fn event_time(time: &RawEventTime, field: &str) -> CalBridgeResult<(NaiveDateTime, Option<String>)> {
    if let Some(ref dt) = time.date_time {
        let parsed = parse_timestamp(dt).ok_or_else(|| {
            CalBridgeError::malformed(GOOGLE_PROVIDER, format!("invalid {} dateTime '{}'", field, dt))
        })?;
        return Ok((parsed, Some(dt.clone())));
    }

    if let Some(ref d) = time.date {
        let date = parse_date(d).ok_or_else(|| {
            CalBridgeError::malformed(GOOGLE_PROVIDER, format!("invalid {} date '{}'", field, d))
        })?;
        return Ok((date.and_time(NaiveTime::MIN), None));
    }

    Err(CalBridgeError::malformed(
        GOOGLE_PROVIDER,
        format!("event {} has neither dateTime nor date", field),
    ))
}
