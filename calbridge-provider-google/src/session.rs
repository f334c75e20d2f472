//! Access tokens for the Google Calendar API.
//!
//! A service account signs a short-lived JWT assertion and trades it at the
//! account's `token_uri` for a bearer token. The token is cached and only
//! refreshed once it is about to expire.

use std::path::Path;

use async_trait::async_trait;
use calbridge_core::{CalBridgeError, CalBridgeResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME: i64 = 3600;
/// Tokens closer than this to expiry are refreshed
const EXPIRY_MARGIN: i64 = 60;

/// Something that can hand out a bearer token for the calendar API
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> CalBridgeResult<String>;
}

/// A fixed token, for tests and pre-authorized deployments
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> CalBridgeResult<String> {
        Ok(self.0.clone())
    }
}

/// Stands in when no usable credentials were configured.
///
/// Every call fails, so only the calendar endpoints are affected.
pub struct MissingCredentials(pub String);

#[async_trait]
impl TokenSource for MissingCredentials {
    async fn access_token(&self) -> CalBridgeResult<String> {
        Err(CalBridgeError::AuthResolutionFailed(self.0.clone()))
    }
}

/// The fields of a Google service-account key file we need
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> CalBridgeResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            CalBridgeError::AuthResolutionFailed(format!("Invalid service account JSON: {}", e))
        })
    }

    pub fn from_file(path: &Path) -> CalBridgeResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalBridgeError::AuthResolutionFailed(format!(
                "Failed to read service account key from {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN) >= self.expires_at
    }
}

/// Service-account session with a lazily refreshed token
pub struct ServiceAccountSession {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountSession {
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> CalBridgeResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            CalBridgeError::AuthResolutionFailed(format!("Invalid service account private key: {}", e))
        })?;

        Ok(ServiceAccountSession {
            key,
            encoding_key,
            http,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn assertion(&self, now: DateTime<Utc>) -> CalBridgeResult<String> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPES.join(" "),
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            CalBridgeError::AuthResolutionFailed(format!("Failed to sign token assertion: {}", e))
        })
    }

    async fn refresh(&self) -> CalBridgeResult<CachedToken> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;

        tracing::debug!(account = %self.key.client_email, "Requesting Google access token");

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                CalBridgeError::AuthResolutionFailed(format!("Failed to reach token endpoint: {}", e))
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(CalBridgeError::AuthResolutionFailed(format!(
                "Token endpoint returned {}: {}",
                status, text
            )));
        }

        let token: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            CalBridgeError::AuthResolutionFailed(format!("Failed to parse token response: {}", e))
        })?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountSession {
    async fn access_token(&self) -> CalBridgeResult<String> {
        // Held across the refresh so concurrent callers share one token request
        let mut cached = self.cached.lock().await;

        if let Some(ref token) = *cached {
            if !token.is_expired(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.refresh().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }
}
