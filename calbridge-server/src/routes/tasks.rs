//! Todoist task endpoints

use axum::{Form, Json, Router, extract::State, routing::get};
use calbridge_core::convert::to_task;
use calbridge_core::{Task, TaskDraft};
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todoist/tasks/", get(list_tasks).post(create_task))
        .route("/todoist/tasks", get(list_tasks).post(create_task))
}

/// A task with its priority spelled out for display
#[derive(Debug, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub priority_label: &'static str,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        TaskView {
            priority_label: task.priority.label(),
            task,
        }
    }
}

/// GET /todoist/tasks/ - All active tasks
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskView>>, AppError> {
    let raw = state.tasks.list_tasks().await?;
    let tasks = raw
        .iter()
        .map(|t| to_task(t).map(TaskView::from))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(tasks))
}

fn default_priority() -> u8 {
    1
}

#[derive(Deserialize)]
pub struct CreateTaskForm {
    pub content: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

/// POST /todoist/tasks/ - Create a task
async fn create_task(
    State(state): State<AppState>,
    Form(form): Form<CreateTaskForm>,
) -> Result<Json<TaskView>, AppError> {
    let draft = TaskDraft::from_form(
        &form.content,
        form.description.as_deref(),
        form.due_date.as_deref(),
        form.priority,
    )?;
    tracing::info!(content = %draft.content, "Creating task");

    let created = state.tasks.create_task(&draft).await?;
    Ok(Json(to_task(&created)?.into()))
}
