//! HTTP front end for calbridge.

pub mod config;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(routes::index::router())
        .merge(routes::calendar::router())
        .merge(routes::tasks::router())
        .merge(routes::sync::router())
        .nest_service("/static", static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
