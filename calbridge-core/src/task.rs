//! Canonical task types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::convert::parse_date;
use crate::error::{CalBridgeError, CalBridgeResult};

/// Todoist priority, 1 (lowest) to 4 (highest).
///
/// The range is not enforced; unknown values are labelled "Low".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u8);

impl Default for Priority {
    fn default() -> Self {
        Priority(1)
    }
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self.0 {
            2 => "Medium",
            3 => "High",
            4 => "Urgent",
            _ => "Low",
        }
    }
}

/// A task (provider-neutral)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub content: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

/// A task to be created on the task-list provider.
///
/// Serializes directly into the body of a Todoist `POST tasks` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDraft {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Datetime-precision due date, for providers that support it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TaskDraft {
    pub fn new(content: impl Into<String>) -> Self {
        TaskDraft {
            content: content.into(),
            description: None,
            due_date: None,
            due_datetime: None,
            priority: None,
        }
    }

    /// Build a draft from user-submitted form fields.
    ///
    /// Blank description and due date are dropped. A due date must be
    /// `YYYY-MM-DD`. A priority of 0 is not sent.
    pub fn from_form(
        content: &str,
        description: Option<&str>,
        due_date: Option<&str>,
        priority: u8,
    ) -> CalBridgeResult<Self> {
        if content.trim().is_empty() {
            return Err(CalBridgeError::InvalidInput("content is required".into()));
        }

        let due_date = match due_date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_date(s).ok_or_else(|| {
                CalBridgeError::InvalidInput(format!(
                    "Invalid due date '{}'. Expected YYYY-MM-DD",
                    s
                ))
            })?),
            None => None,
        };

        Ok(TaskDraft {
            content: content.to_string(),
            description: description
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            due_date,
            due_datetime: None,
            priority: (priority > 0).then_some(Priority(priority)),
        })
    }
}
