use crate::constants::{SYNCED_TASK_PREFIX, UNTITLED_EVENT};
use crate::event::CalendarEvent;
use crate::task::TaskDraft;

/// Build the task draft for a synced calendar event.
///
/// Content is `"Calendar: " + title`, the due date is the start date, and
/// the original precise start is passed along as `due_datetime`.
pub fn to_task_draft(event: &CalendarEvent) -> TaskDraft {
    let title = if event.title.is_empty() {
        UNTITLED_EVENT
    } else {
        event.title.as_str()
    };

    TaskDraft {
        content: format!("{}{}", SYNCED_TASK_PREFIX, title),
        description: Some(event.description.clone()),
        due_date: Some(event.start.date()),
        due_datetime: event.start_precise.clone(),
        priority: None,
    }
}
