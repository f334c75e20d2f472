//! Google Calendar v3 REST client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use calbridge_core::constants::GOOGLE_PROVIDER;
use calbridge_core::convert::to_event_body;
use calbridge_core::raw::{RawEvent, RawEventList};
use calbridge_core::{CalBridgeError, CalBridgeResult, CalendarProvider, EventDraft, EventQuery};
use serde::de::DeserializeOwned;
use url::Url;

use crate::session::TokenSource;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3/";

pub struct GoogleCalendar {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl GoogleCalendar {
    pub fn new(base_url: Url, tokens: Arc<dyn TokenSource>, timeout: Duration) -> CalBridgeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CalBridgeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(http, base_url, tokens))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url, tokens: Arc<dyn TokenSource>) -> Self {
        GoogleCalendar {
            http,
            base_url,
            tokens,
        }
    }

    /// `{base}/calendars/{calendar_id}/events`, with the id percent-encoded
    fn events_url(&self, calendar_id: &str) -> CalBridgeResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CalBridgeError::Config(format!("Invalid calendar base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(&["calendars", calendar_id, "events"]);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> CalBridgeResult<T> {
        let token = self.tokens.access_token().await?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CalBridgeError::unavailable(GOOGLE_PROVIDER, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CalBridgeError::unavailable(GOOGLE_PROVIDER, e))?;

        if !status.is_success() {
            return Err(CalBridgeError::unavailable(
                GOOGLE_PROVIDER,
                format!("request failed with status {}: {}", status, text),
            ));
        }

        serde_json::from_str(&text).map_err(|e| CalBridgeError::malformed(GOOGLE_PROVIDER, e))
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> CalBridgeResult<Vec<RawEvent>> {
        let url = self.events_url(calendar_id)?;
        tracing::debug!(calendar_id, "Listing Google Calendar events");

        let list: RawEventList = self
            .send(self.http.get(url).query(&query.to_params()))
            .await?;

        Ok(list.items)
    }

    async fn create_event(&self, calendar_id: &str, draft: &EventDraft) -> CalBridgeResult<RawEvent> {
        let url = self.events_url(calendar_id)?;
        tracing::debug!(calendar_id, summary = %draft.summary, "Creating Google Calendar event");

        self.send(self.http.post(url).json(&to_event_body(draft)))
            .await
    }
}
