pub mod calendar;
pub mod index;
pub mod sync;
pub mod tasks;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calbridge_core::{CalBridgeError, ErrorKind};
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

/// Converts calbridge errors to HTTP responses
#[derive(Debug)]
pub enum AppError {
    CalBridge(CalBridgeError),
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CalBridge(err) => match err.kind() {
                ErrorKind::InvalidInput | ErrorKind::InvalidWindow => StatusCode::BAD_REQUEST,
                ErrorKind::ProviderUnavailable
                | ErrorKind::TaskCreationFailed
                | ErrorKind::MalformedProviderResponse => StatusCode::BAD_GATEWAY,
                ErrorKind::AuthResolutionFailed | ErrorKind::Config => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound(error) => ErrorResponse { error, kind: None },
            AppError::CalBridge(err) => {
                if status.is_server_error() {
                    tracing::error!(error = %err, "Request failed");
                }
                ErrorResponse {
                    error: err.to_string(),
                    kind: Some(err.kind()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<CalBridgeError> for AppError {
    fn from(err: CalBridgeError) -> Self {
        AppError::CalBridge(err)
    }
}
