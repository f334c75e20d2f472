use chrono::NaiveDateTime;

use crate::event::EventDraft;
use crate::raw::{RawEvent, RawEventTime};

const EVENT_TIME_ZONE: &str = "UTC";

/// Build the body of a Google `events.insert` call.
///
/// Times are sent as UTC; a blank location is left out.
pub fn to_event_body(draft: &EventDraft) -> RawEvent {
    RawEvent {
        id: None,
        summary: Some(draft.summary.clone()),
        description: draft.description.clone(),
        location: draft.location.clone().filter(|l| !l.is_empty()),
        start: Some(utc_time(draft.start)),
        end: Some(utc_time(draft.end)),
    }
}

fn utc_time(at: NaiveDateTime) -> RawEventTime {
    RawEventTime {
        date_time: Some(at.format("%Y-%m-%dT%H:%M:%S").to_string()),
        date: None,
        time_zone: Some(EVENT_TIME_ZONE.to_string()),
    }
}
