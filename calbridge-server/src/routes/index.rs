//! The single-page front end

use axum::{Router, extract::State, response::Html, routing::get};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// GET / - Serve the configured index page
async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.index_path();
    tokio::fs::read_to_string(&path)
        .await
        .map(Html)
        .map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Index page unavailable");
            AppError::NotFound(format!("Index page not found: {}", path.display()))
        })
}
