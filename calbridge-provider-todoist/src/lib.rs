//! Todoist REST v2 client for calbridge.

use std::time::Duration;

use async_trait::async_trait;
use calbridge_core::constants::TODOIST_PROVIDER;
use calbridge_core::raw::RawTask;
use calbridge_core::{CalBridgeError, CalBridgeResult, TaskDraft, TaskProvider};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2/";

pub struct Todoist {
    http: reqwest::Client,
    tasks_url: Url,
}

impl Todoist {
    /// Create a client whose every request carries `token` as a bearer token.
    pub fn new(base_url: &Url, token: &str, timeout: Duration) -> CalBridgeResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| CalBridgeError::Config("Todoist token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CalBridgeError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Todoist {
            http,
            tasks_url: tasks_url(base_url)?,
        })
    }
}

/// `{base}/tasks`, whether or not the base ends with a slash
fn tasks_url(base_url: &Url) -> CalBridgeResult<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| CalBridgeError::Config(format!("Invalid Todoist base URL: {}", base_url)))?
        .pop_if_empty()
        .push("tasks");
    Ok(url)
}

fn read_body<T: serde::de::DeserializeOwned>(text: &str) -> CalBridgeResult<T> {
    serde_json::from_str(text).map_err(|e| CalBridgeError::malformed(TODOIST_PROVIDER, e))
}

#[async_trait]
impl TaskProvider for Todoist {
    async fn list_tasks(&self) -> CalBridgeResult<Vec<RawTask>> {
        tracing::debug!("Listing Todoist tasks");

        let response = self
            .http
            .get(self.tasks_url.clone())
            .send()
            .await
            .map_err(|e| CalBridgeError::unavailable(TODOIST_PROVIDER, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CalBridgeError::unavailable(TODOIST_PROVIDER, e))?;

        if !status.is_success() {
            return Err(CalBridgeError::unavailable(
                TODOIST_PROVIDER,
                format!("listing tasks failed with status {}", status),
            ));
        }

        read_body(&text)
    }

    async fn create_task(&self, draft: &TaskDraft) -> CalBridgeResult<RawTask> {
        tracing::debug!(content = %draft.content, "Creating Todoist task");

        let response = self
            .http
            .post(self.tasks_url.clone())
            .json(draft)
            .send()
            .await
            .map_err(|e| CalBridgeError::unavailable(TODOIST_PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalBridgeError::TaskCreationFailed {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| CalBridgeError::unavailable(TODOIST_PROVIDER, e))?;

        read_body(&text)
    }
}
