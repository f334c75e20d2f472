use std::sync::Arc;

use calbridge_core::{CalBridgeError, CalBridgeResult, CalendarProvider, TaskProvider};
use calbridge_provider_google::{
    GoogleCalendar, MissingCredentials, ServiceAccountKey, ServiceAccountSession, TokenSource,
};
use calbridge_provider_todoist::Todoist;

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub calendar: Arc<dyn CalendarProvider>,
    pub tasks: Arc<dyn TaskProvider>,
}

impl AppState {
    /// Wire up the Google Calendar and Todoist clients described by `config`.
    pub fn from_config(config: AppConfig) -> CalBridgeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CalBridgeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let tokens = token_source(&config, http.clone())?;
        let calendar = GoogleCalendar::with_client(http, config.google_calendar_url()?, tokens);
        let tasks = Todoist::new(
            &config.todoist_url()?,
            &config.todoist_token,
            config.request_timeout(),
        )?;

        Ok(AppState::new(config, Arc::new(calendar), Arc::new(tasks)))
    }

    pub fn new(
        config: AppConfig,
        calendar: Arc<dyn CalendarProvider>,
        tasks: Arc<dyn TaskProvider>,
    ) -> Self {
        AppState {
            config: Arc::new(config),
            calendar,
            tasks,
        }
    }
}

/// Inline JSON wins over a key file. Without either, calendar calls fail
/// with an auth error but the server still runs.
fn token_source(config: &AppConfig, http: reqwest::Client) -> CalBridgeResult<Arc<dyn TokenSource>> {
    let key = match (&config.google_credentials_json, &config.google_credentials_file) {
        (Some(json), _) if !json.trim().is_empty() => ServiceAccountKey::from_json(json)?,
        (_, Some(path)) => ServiceAccountKey::from_file(path)?,
        _ => {
            tracing::warn!("No Google credentials configured; calendar endpoints will fail");
            return Ok(Arc::new(MissingCredentials(
                "GOOGLE_CREDENTIALS_JSON is not set".into(),
            )));
        }
    };

    let session = ServiceAccountSession::new(key, http)?;
    tracing::info!(client_email = session.client_email(), "Using Google service account");
    Ok(Arc::new(session))
}
