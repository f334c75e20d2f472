//! Calendar-to-Todoist sync endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::post,
};
use calbridge_core::{SyncReport, SyncWindow, Synchronizer};
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sync-calendar-to-todoist/", post(sync))
        .route("/sync-calendar-to-todoist", post(sync))
}

#[derive(Deserialize)]
pub struct SyncParams {
    pub days_ahead: Option<u32>,
}

/// POST /sync-calendar-to-todoist/ - Copy upcoming events into Todoist
async fn sync(
    State(state): State<AppState>,
    Query(params): Query<SyncParams>,
) -> Result<Json<SyncReport>, AppError> {
    let days_ahead = params.days_ahead.unwrap_or(state.config.days_ahead);
    let window = SyncWindow::upcoming(days_ahead)?;

    let report = Synchronizer::new(state.calendar.as_ref(), state.tasks.as_ref())
        .sync(&state.config.calendar_id, &window, &())
        .await?;

    if !report.is_complete() {
        tracing::warn!(
            skipped = report.skipped.len(),
            attempted = report.attempted(),
            "Sync left some events without tasks"
        );
    }

    Ok(Json(report))
}
