//! Calendar-to-task synchronization.
//!
//! A sync is a single linear pass: one listing of the calendar window, then
//! one task creation per event, in event order. A failing event is recorded
//! in the [`SyncReport`] and the pass moves on; nothing is retried and
//! nothing is deduplicated, so syncing the same window twice creates every
//! task twice.

use serde::Serialize;

use crate::convert::{to_calendar_event, to_task, to_task_draft};
use crate::error::{CalBridgeError, CalBridgeResult, ErrorKind};
use crate::provider::{CalendarProvider, TaskProvider};
use crate::raw::RawEvent;
use crate::task::Task;
use crate::window::{EventQuery, SyncWindow};

/// Outcome of a sync pass
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub window: SyncWindow,
    /// Created tasks, in the order of their source events
    pub created: Vec<Task>,
    pub skipped: Vec<SkippedEvent>,
}

impl SyncReport {
    fn new(window: SyncWindow) -> Self {
        SyncReport {
            window,
            created: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Number of events the pass tried to turn into tasks
    pub fn attempted(&self) -> usize {
        self.created.len() + self.skipped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// An event that did not yield a task in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEvent {
    /// Zero-based position of the event in the calendar listing
    pub position: usize,
    pub title: String,
    pub kind: ErrorKind,
    pub reason: String,
    /// The task provider accepted the creation but its reply was unreadable.
    ///
    /// The task exists remotely; syncing the window again duplicates it.
    pub task_created: bool,
}

impl SkippedEvent {
    fn new(position: usize, raw: &RawEvent, failure: &EventFailure) -> Self {
        SkippedEvent {
            position,
            title: raw.summary.clone().unwrap_or_default(),
            kind: failure.err.kind(),
            reason: failure.err.to_string(),
            task_created: failure.task_created,
        }
    }
}

/// Why one event produced no task
struct EventFailure {
    err: CalBridgeError,
    task_created: bool,
}

impl EventFailure {
    fn before_create(err: CalBridgeError) -> Self {
        EventFailure {
            err,
            task_created: false,
        }
    }

    fn after_create(err: CalBridgeError) -> Self {
        EventFailure {
            err,
            task_created: true,
        }
    }
}

/// Receives per-event outcomes while a sync runs.
pub trait SyncObserver: Sync {
    fn task_created(&self, _position: usize, _task: &Task) {}

    fn event_skipped(&self, _skipped: &SkippedEvent, _err: &CalBridgeError) {}
}

/// The silent observer
impl SyncObserver for () {}

/// Copies upcoming calendar events into the task list.
pub struct Synchronizer<'a, C: ?Sized, T: ?Sized> {
    calendar: &'a C,
    tasks: &'a T,
}

impl<'a, C, T> Synchronizer<'a, C, T>
where
    C: CalendarProvider + ?Sized,
    T: TaskProvider + ?Sized,
{
    pub fn new(calendar: &'a C, tasks: &'a T) -> Self {
        Synchronizer { calendar, tasks }
    }

    /// Run one pass over `window`.
    ///
    /// Only the calendar listing can fail the whole pass.
    pub async fn sync(
        &self,
        calendar_id: &str,
        window: &SyncWindow,
        observer: &dyn SyncObserver,
    ) -> CalBridgeResult<SyncReport> {
        tracing::info!(
            calendar_id,
            from = %window.start(),
            to = %window.end(),
            "Syncing calendar events into tasks"
        );

        let events = self
            .calendar
            .list_events(calendar_id, &EventQuery::from(window))
            .await?;

        let mut report = SyncReport::new(window.clone());

        for (position, raw) in events.iter().enumerate() {
            match self.sync_event(raw).await {
                Ok(task) => {
                    observer.task_created(position, &task);
                    report.created.push(task);
                }
                Err(failure) => {
                    let skipped = SkippedEvent::new(position, raw, &failure);
                    tracing::warn!(
                        position,
                        title = %skipped.title,
                        task_created = skipped.task_created,
                        error = %failure.err,
                        "Skipping calendar event"
                    );
                    observer.event_skipped(&skipped, &failure.err);
                    report.skipped.push(skipped);
                }
            }
        }

        tracing::info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Sync finished"
        );

        Ok(report)
    }

    async fn sync_event(&self, raw: &RawEvent) -> Result<Task, EventFailure> {
        let event = to_calendar_event(raw).map_err(EventFailure::before_create)?;
        let draft = to_task_draft(&event);
        tracing::debug!(content = %draft.content, "Creating task for event");

        let created = self
            .tasks
            .create_task(&draft)
            .await
            .map_err(EventFailure::before_create)?;
        to_task(&created).map_err(EventFailure::after_create)
    }
}
