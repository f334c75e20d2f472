/// Default number of days ahead covered by a sync.
pub const DEFAULT_DAYS_AHEAD: u32 = 7;

/// Google's alias for the account's main calendar
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Default number of events returned by the calendar listing endpoint.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Prefix of every task created from a calendar event.
pub const SYNCED_TASK_PREFIX: &str = "Calendar: ";

/// Title used for events that have none.
pub const UNTITLED_EVENT: &str = "Event";

pub const GOOGLE_PROVIDER: &str = "Google Calendar";
pub const TODOIST_PROVIDER: &str = "Todoist";
