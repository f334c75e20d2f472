use crate::constants::TODOIST_PROVIDER;
use crate::convert::parse_date;
use crate::error::{CalBridgeError, CalBridgeResult};
use crate::raw::RawTask;
use crate::task::{Priority, Task};

/// Convert a Todoist task into a [`Task`].
///
/// The due date is read only from `due.date`.
pub fn to_task(raw: &RawTask) -> CalBridgeResult<Task> {
    let due_date = match raw.due.as_ref().and_then(|due| due.date.as_deref()) {
        Some(d) => Some(parse_date(d).ok_or_else(|| {
            CalBridgeError::malformed(TODOIST_PROVIDER, format!("invalid due date '{}'", d))
        })?),
        None => None,
    };

    Ok(Task {
        content: raw.content.clone(),
        description: raw.description.clone().unwrap_or_default(),
        due_date,
        priority: raw.priority.map(Priority).unwrap_or_default(),
    })
}
