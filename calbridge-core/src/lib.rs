//! Core types for calbridge.
//!
//! This crate holds everything that does not talk HTTP itself:
//! - canonical `CalendarEvent` and `Task` records and their outbound drafts
//! - the raw provider JSON shapes and the mapping between the two
//! - the provider traits implemented by the Google and Todoist clients
//! - the calendar-to-task sync pipeline

pub mod constants;
pub mod convert;
pub mod error;
pub mod event;
pub mod provider;
pub mod raw;
pub mod sync;
pub mod task;
pub mod window;

pub use error::{CalBridgeError, CalBridgeResult, ErrorKind};
pub use event::{CalendarEvent, EventDraft};
pub use provider::{CalendarProvider, TaskProvider};
pub use sync::{SkippedEvent, SyncObserver, SyncReport, Synchronizer};
pub use task::{Priority, Task, TaskDraft};
pub use window::{EventQuery, SyncWindow};
