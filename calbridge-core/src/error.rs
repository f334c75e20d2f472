//! Error types for calbridge.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while talking to providers or syncing.
#[derive(Error, Debug)]
pub enum CalBridgeError {
    #[error("Could not resolve credentials: {0}")]
    AuthResolutionFailed(String),

    #[error("{provider} is unavailable: {reason}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: String,
    },

    #[error("Task creation failed with status {status}")]
    TaskCreationFailed { status: u16 },

    #[error("Unexpected response from {provider}: {reason}")]
    MalformedProviderResponse {
        provider: &'static str,
        reason: String,
    },

    #[error("Invalid sync window: {0}")]
    InvalidWindow(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`CalBridgeError`], suitable for reports and API bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthResolutionFailed,
    ProviderUnavailable,
    TaskCreationFailed,
    MalformedProviderResponse,
    InvalidWindow,
    InvalidInput,
    Config,
}

impl CalBridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalBridgeError::AuthResolutionFailed(_) => ErrorKind::AuthResolutionFailed,
            CalBridgeError::ProviderUnavailable { .. } => ErrorKind::ProviderUnavailable,
            CalBridgeError::TaskCreationFailed { .. } => ErrorKind::TaskCreationFailed,
            CalBridgeError::MalformedProviderResponse { .. } => {
                ErrorKind::MalformedProviderResponse
            }
            CalBridgeError::InvalidWindow(_) => ErrorKind::InvalidWindow,
            CalBridgeError::InvalidInput(_) => ErrorKind::InvalidInput,
            CalBridgeError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn unavailable(provider: &'static str, reason: impl ToString) -> Self {
        CalBridgeError::ProviderUnavailable {
            provider,
            reason: reason.to_string(),
        }
    }

    pub fn malformed(provider: &'static str, reason: impl ToString) -> Self {
        CalBridgeError::MalformedProviderResponse {
            provider,
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for calbridge operations.
pub type CalBridgeResult<T> = Result<T, CalBridgeError>;
