//! Server configuration.
//!
//! Read once at startup from an optional TOML file, overlaid by environment
//! variables (`TODOIST_TOKEN`, `CALENDAR_ID`, ...). A `.env` file in the
//! working directory is loaded into the environment first.

use std::path::{Path, PathBuf};
use std::time::Duration;

use calbridge_core::constants::{DEFAULT_CALENDAR_ID, DEFAULT_DAYS_AHEAD};
use calbridge_core::{CalBridgeError, CalBridgeResult, SyncWindow};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "CALBRIDGE_CONFIG";
static DEFAULT_CONFIG_PATH: &str = "calbridge.toml";

fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}

fn default_todoist_base_url() -> String {
    calbridge_provider_todoist::DEFAULT_BASE_URL.to_string()
}

fn default_google_calendar_base_url() -> String {
    calbridge_provider_google::DEFAULT_BASE_URL.to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_index_file() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_days_ahead() -> u32 {
    DEFAULT_DAYS_AHEAD
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Inline service-account key JSON
    #[serde(default)]
    pub google_credentials_json: Option<String>,

    /// Path to a service-account key file, used when no inline JSON is set
    #[serde(default)]
    pub google_credentials_file: Option<PathBuf>,

    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    pub todoist_token: String,

    #[serde(default = "default_todoist_base_url")]
    pub todoist_base_url: String,

    #[serde(default = "default_google_calendar_base_url")]
    pub google_calendar_base_url: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,

    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load `.env`, then the config file named by `CALBRIDGE_CONFIG`, then the environment.
    pub fn load() -> CalBridgeResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(CalBridgeError::Config(format!("Could not read .env: {e}"))),
        }

        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::from_sources(&path, Environment::default())
    }

    /// Build from a (possibly missing) TOML file overlaid by `env`.
    pub fn from_sources(path: &Path, env: Environment) -> CalBridgeResult<Self> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CalBridgeError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CalBridgeResult<()> {
        if self.todoist_token.trim().is_empty() {
            return Err(CalBridgeError::Config("todoist_token must not be empty".into()));
        }
        SyncWindow::upcoming(self.days_ahead)
            .map_err(|e| CalBridgeError::Config(format!("Invalid days_ahead: {e}")))?;
        self.todoist_url()?;
        self.google_calendar_url()?;
        Ok(())
    }

    pub fn todoist_url(&self) -> CalBridgeResult<Url> {
        parse_url("todoist_base_url", &self.todoist_base_url)
    }

    pub fn google_calendar_url(&self) -> CalBridgeResult<Url> {
        parse_url("google_calendar_base_url", &self.google_calendar_base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

fn parse_url(key: &str, value: &str) -> CalBridgeResult<Url> {
    Url::parse(value).map_err(|e| CalBridgeError::Config(format!("Invalid {key} '{value}': {e}")))
}
