//! Traits implemented by the provider clients.
//!
//! The sync pipeline and the HTTP server only ever see these traits, so
//! either side can be swapped for an in-memory fake in tests.

use async_trait::async_trait;

use crate::error::CalBridgeResult;
use crate::event::EventDraft;
use crate::raw::{RawEvent, RawTask};
use crate::task::TaskDraft;
use crate::window::EventQuery;

/// A calendar provider (Google Calendar)
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// List single event instances matching `query`, ordered by start time
    async fn list_events(&self, calendar_id: &str, query: &EventQuery)
    -> CalBridgeResult<Vec<RawEvent>>;

    /// Create an event and return the provider's copy of it
    async fn create_event(&self, calendar_id: &str, draft: &EventDraft) -> CalBridgeResult<RawEvent>;
}

/// A task-list provider (Todoist)
#[async_trait]
pub trait TaskProvider: Send + Sync {
    async fn list_tasks(&self) -> CalBridgeResult<Vec<RawTask>>;

    /// Create a task and return the provider's copy of it
    async fn create_task(&self, draft: &TaskDraft) -> CalBridgeResult<RawTask>;
}
