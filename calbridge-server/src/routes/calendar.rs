//! Calendar event endpoints

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    routing::get,
};
use calbridge_core::constants::DEFAULT_MAX_RESULTS;
use calbridge_core::convert::{parse_timestamp, to_calendar_event};
use calbridge_core::{CalBridgeError, CalBridgeResult, CalendarEvent, EventDraft, EventQuery};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar/events/", get(list_events).post(create_event))
        .route("/calendar/events", get(list_events).post(create_event))
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

#[derive(Deserialize)]
pub struct ListEventsParams {
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// ISO timestamp; read as UTC unless it carries an offset
    pub time_min: Option<String>,
}

/// GET /calendar/events/ - Upcoming events on the configured calendar
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let time_min = match params.time_min.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(s) => query_timestamp("time_min", s)?,
        None => Utc::now(),
    };

    let raw = state
        .calendar
        .list_events(
            &state.config.calendar_id,
            &EventQuery::upcoming(time_min, params.max_results),
        )
        .await?;

    let events = raw
        .iter()
        .filter_map(|event| match to_calendar_event(event) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(id = ?event.id, error = %e, "Dropping unreadable event");
                None
            }
        })
        .collect();

    Ok(Json(events))
}

#[derive(Deserialize)]
pub struct CreateEventForm {
    pub summary: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
}

impl CreateEventForm {
    fn into_draft(self) -> CalBridgeResult<EventDraft> {
        if self.summary.trim().is_empty() {
            return Err(CalBridgeError::InvalidInput("summary is required".into()));
        }

        let start = form_timestamp("start_time", &self.start_time)?;
        let end = form_timestamp("end_time", &self.end_time)?;
        if end < start {
            return Err(CalBridgeError::InvalidInput(
                "end_time must not be before start_time".into(),
            ));
        }

        let mut draft = EventDraft::new(self.summary, start, end);
        draft.description = self.description.filter(|s| !s.trim().is_empty());
        draft.location = self.location.filter(|s| !s.trim().is_empty());
        Ok(draft)
    }
}

/// POST /calendar/events/ - Create an event on the configured calendar
async fn create_event(
    State(state): State<AppState>,
    Form(form): Form<CreateEventForm>,
) -> Result<Json<CalendarEvent>, AppError> {
    let draft = form.into_draft()?;
    tracing::info!(summary = %draft.summary, start = %draft.start, "Creating calendar event");

    let created = state
        .calendar
        .create_event(&state.config.calendar_id, &draft)
        .await?;

    Ok(Json(to_calendar_event(&created)?))
}

/// An offset, when present, is honoured rather than dropped.
fn query_timestamp(field: &str, value: &str) -> CalBridgeResult<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(at) => Ok(at.with_timezone(&Utc)),
        Err(_) => form_timestamp(field, value).map(|naive| naive.and_utc()),
    }
}

fn form_timestamp(field: &str, value: &str) -> CalBridgeResult<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| {
        CalBridgeError::InvalidInput(format!(
            "Invalid {field} '{value}'. Expected YYYY-MM-DDTHH:MM"
        ))
    })
}
