//! Router tests against in-memory providers.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use calbridge_core::raw::{RawEvent, RawTask};
use calbridge_core::{
    CalBridgeError, CalBridgeResult, CalendarProvider, EventDraft, EventQuery, TaskDraft,
    TaskProvider,
};
use calbridge_server::app;
use calbridge_server::config::AppConfig;
use calbridge_server::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct FakeCalendar {
    events: Vec<Value>,
    auth_broken: bool,
    queries: Mutex<Vec<(String, EventQuery)>>,
    drafts: Mutex<Vec<EventDraft>>,
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> CalBridgeResult<Vec<RawEvent>> {
        if self.auth_broken {
            return Err(CalBridgeError::AuthResolutionFailed(
                "GOOGLE_CREDENTIALS_JSON is not set".into(),
            ));
        }
        self.queries
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), query.clone()));
        Ok(self
            .events
            .iter()
            .map(|e| serde_json::from_value(e.clone()).unwrap())
            .collect())
    }

    async fn create_event(&self, _calendar_id: &str, draft: &EventDraft) -> CalBridgeResult<RawEvent> {
        self.drafts.lock().unwrap().push(draft.clone());
        Ok(calbridge_core::convert::to_event_body(draft))
    }
}

#[derive(Default)]
struct FakeTasks {
    existing: Vec<Value>,
    down: bool,
    fail_on: Vec<usize>,
    drafts: Mutex<Vec<TaskDraft>>,
}

#[async_trait]
impl TaskProvider for FakeTasks {
    async fn list_tasks(&self) -> CalBridgeResult<Vec<RawTask>> {
        if self.down {
            return Err(CalBridgeError::unavailable("Todoist", "connection refused"));
        }
        Ok(self
            .existing
            .iter()
            .map(|t| serde_json::from_value(t.clone()).unwrap())
            .collect())
    }

    async fn create_task(&self, draft: &TaskDraft) -> CalBridgeResult<RawTask> {
        let mut drafts = self.drafts.lock().unwrap();
        let call = drafts.len();
        drafts.push(draft.clone());
        if self.fail_on.contains(&call) {
            return Err(CalBridgeError::TaskCreationFailed { status: 500 });
        }
        Ok(RawTask {
            id: Some(format!("task-{}", call)),
            content: draft.content.clone(),
            description: draft.description.clone(),
            due: None,
            priority: draft.priority.map(|p| p.0),
        })
    }
}

fn config(static_dir: &Path) -> AppConfig {
    AppConfig {
        google_credentials_json: None,
        google_credentials_file: None,
        calendar_id: "primary".into(),
        todoist_token: "t".into(),
        todoist_base_url: calbridge_provider_todoist::DEFAULT_BASE_URL.into(),
        google_calendar_base_url: calbridge_provider_google::DEFAULT_BASE_URL.into(),
        listen_addr: "127.0.0.1:0".into(),
        static_dir: static_dir.to_path_buf(),
        index_file: "index.html".into(),
        days_ahead: 7,
        request_timeout_secs: 5,
    }
}

fn router(calendar: &Arc<FakeCalendar>, tasks: &Arc<FakeTasks>, static_dir: &Path) -> Router {
    app(AppState::new(
        config(static_dir),
        calendar.clone(),
        tasks.clone(),
    ))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn three_events() -> Vec<Value> {
    ["A", "B", "C"]
        .iter()
        .map(|title| json!({"summary": title, "start": {"dateTime": "2024-01-02T09:00:00Z"}}))
        .collect()
}

#[tokio::test]
async fn test_index_and_static_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>calbridge</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('hi');").unwrap();

    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks::default());

    let response = router(&calendar, &tasks, dir.path())
        .oneshot(get("/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"<h1>calbridge</h1>");

    let response = router(&calendar, &tasks, dir.path())
        .oneshot(get("/static/app.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_index_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(router(&calendar, &tasks, dir.path()), get("/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("index.html"));
}

#[tokio::test]
async fn test_list_events_passes_query() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar {
        events: vec![
            json!({"summary": "Standup", "start": {"dateTime": "2024-01-02T09:00:00Z"}}),
            json!({"summary": "Offsite", "start": {"date": "2024-01-05"}}),
            json!({"summary": "No start"}),
        ],
        ..Default::default()
    });
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        get("/calendar/events/?max_results=5&time_min=2024-01-01T00:00:00"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "Standup");
    assert_eq!(events[0]["start"], "2024-01-02T09:00:00");
    assert_eq!(events[1]["start"], "2024-01-05T00:00:00");
    assert_eq!(events[1]["description"], "");

    let queries = calendar.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].0, "primary");
    assert_eq!(queries[0].1.max_results, Some(5));
    assert_eq!(queries[0].1.time_min.to_rfc3339(), "2024-01-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_create_event_from_form() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        post_form(
            "/calendar/events/",
            "summary=Lunch&description=&start_time=2024-03-10T12:00&end_time=2024-03-10T13:00&location=Cafe",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Lunch");
    assert_eq!(body["location"], "Cafe");
    assert_eq!(body["end"], "2024-03-10T13:00:00");

    let drafts = calendar.drafts.lock().unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].description, None);
    assert_eq!(drafts[0].location.as_deref(), Some("Cafe"));
}

#[tokio::test]
async fn test_create_event_rejects_bad_time() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        post_form(
            "/calendar/events/",
            "summary=Lunch&start_time=noon&end_time=2024-03-10T13:00",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_input");
    assert!(calendar.drafts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar {
        auth_broken: true,
        ..Default::default()
    });
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(router(&calendar, &tasks, dir.path()), get("/calendar/events/")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "auth_resolution_failed");
}

#[tokio::test]
async fn test_list_tasks_with_labels() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks {
        existing: vec![
            json!({"id": "1", "content": "Write report", "priority": 4, "due": {"date": "2024-01-09"}}),
            json!({"id": "2", "content": "Call Sam"}),
        ],
        ..Default::default()
    });

    let (status, body) = send(router(&calendar, &tasks, dir.path()), get("/todoist/tasks")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "Write report");
    assert_eq!(body[0]["priority"], 4);
    assert_eq!(body[0]["priority_label"], "Urgent");
    assert_eq!(body[0]["due_date"], "2024-01-09");
    assert_eq!(body[1]["priority_label"], "Low");
    assert_eq!(body[1]["due_date"], Value::Null);
}

#[tokio::test]
async fn test_todoist_down_is_502() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks {
        down: true,
        ..Default::default()
    });

    let (status, body) = send(router(&calendar, &tasks, dir.path()), get("/todoist/tasks/")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "provider_unavailable");
}

#[tokio::test]
async fn test_create_task_from_form() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        post_form("/todoist/tasks/", "content=Buy+milk&due_date=2024-02-01&priority=3"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Buy milk");
    assert_eq!(body["priority_label"], "High");

    let drafts = tasks.drafts.lock().unwrap();
    assert_eq!(drafts[0].due_date.map(|d| d.to_string()).as_deref(), Some("2024-02-01"));
    assert_eq!(drafts[0].description, None);
}

#[tokio::test]
async fn test_create_task_requires_content() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        post_form("/todoist/tasks/", "content=+&priority=1"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_input");
    assert!(tasks.drafts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_reports_partial_failure() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar {
        events: three_events(),
        ..Default::default()
    });
    let tasks = Arc::new(FakeTasks {
        fail_on: vec![1],
        ..Default::default()
    });

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        post_form("/sync-calendar-to-todoist/?days_ahead=3", ""),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let created: Vec<_> = body["created"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["content"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(created, vec!["Calendar: A", "Calendar: C"]);
    assert_eq!(body["skipped"][0]["position"], 1);
    assert_eq!(body["skipped"][0]["title"], "B");
    assert_eq!(body["skipped"][0]["kind"], "task_creation_failed");

    let queries = calendar.queries.lock().unwrap();
    let query = &queries[0].1;
    let span = query.time_max.unwrap() - query.time_min;
    assert_eq!(span.num_days(), 3);
}

#[tokio::test]
async fn test_sync_rejects_zero_days() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar {
        events: three_events(),
        ..Default::default()
    });
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        post_form("/sync-calendar-to-todoist/?days_ahead=0", ""),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_window");
    assert!(calendar.queries.lock().unwrap().is_empty());
    assert!(tasks.drafts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_rejects_days_past_calendar_range() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar {
        events: three_events(),
        ..Default::default()
    });
    let tasks = Arc::new(FakeTasks::default());

    for days in ["100000000", "4294967295"] {
        let (status, body) = send(
            router(&calendar, &tasks, dir.path()),
            post_form(&format!("/sync-calendar-to-todoist/?days_ahead={days}"), ""),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_window");
    }
    assert!(calendar.queries.lock().unwrap().is_empty());
    assert!(tasks.drafts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_accepts_a_century_ahead() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar {
        events: three_events(),
        ..Default::default()
    });
    let tasks = Arc::new(FakeTasks::default());

    let (status, body) = send(
        router(&calendar, &tasks, dir.path()),
        post_form("/sync-calendar-to-todoist/?days_ahead=36500", ""),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"].as_array().unwrap().len(), 3);
    let queries = calendar.queries.lock().unwrap();
    let query = &queries[0].1;
    assert_eq!((query.time_max.unwrap() - query.time_min).num_days(), 36500);
}

#[tokio::test]
async fn test_list_events_honours_time_min_offset() {
    let dir = tempfile::tempdir().unwrap();
    let calendar = Arc::new(FakeCalendar::default());
    let tasks = Arc::new(FakeTasks::default());

    let (status, _) = send(
        router(&calendar, &tasks, dir.path()),
        get("/calendar/events/?time_min=2024-01-01T00:00:00%2B05:00"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let queries = calendar.queries.lock().unwrap();
    assert_eq!(queries[0].1.time_min.to_rfc3339(), "2023-12-31T19:00:00+00:00");
}
