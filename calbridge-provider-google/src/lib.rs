//! Google Calendar provider for calbridge.
//!
//! Authenticates with a service account and talks to the Calendar v3 REST
//! API directly.

mod client;
mod session;

pub use client::{DEFAULT_BASE_URL, GoogleCalendar};
pub use session::{
    MissingCredentials, SCOPES, ServiceAccountKey, ServiceAccountSession, StaticToken, TokenSource,
};
