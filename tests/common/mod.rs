//! Shared utilities for integration tests: an in-process mock of the VaaS API.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use vaas_hook::config::HookConfig;

pub const USERNAME: &str = "executor";
pub const API_KEY: &str = "secret";
pub const DIRECTOR: &str = "web-director";
pub const DIRECTOR_ID: u64 = 42;

/// A request as seen by the mock.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub prefer: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub requests: Vec<Recorded>,
    pub backends: Vec<Value>,
    pub deleted: Vec<u64>,
    /// Task statuses served in order; `PENDING` once exhausted.
    pub task_statuses: VecDeque<&'static str>,
    pub fail_delete: bool,
    /// Answer queued creates with 201 and no `Location` header.
    pub omit_location: bool,
    next_backend_id: u64,
}

/// Handle to the running mock VaaS.
#[derive(Clone)]
pub struct MockVaas {
    pub addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
}

#[allow(dead_code)]
impl MockVaas {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    pub fn set_task_statuses(&self, statuses: &[&'static str]) {
        self.with_state(|s| s.task_statuses = statuses.iter().copied().collect());
    }

    pub fn request_count(&self) -> usize {
        self.with_state(|s| s.requests.len())
    }

    /// Hook configuration pointing at this mock.
    pub fn hook_config(&self) -> HookConfig {
        let mut config = HookConfig::default();
        config.vaas.api_host = self.url();
        config.vaas.username = USERNAME.to_string();
        config.vaas.api_key = API_KEY.to_string();
        config.vaas.request_timeout_secs = 5;
        config.polling.interval_ms = 20;
        config.polling.max_wait_secs = 2;
        config.runtime.address = Some("10.0.0.5".to_string());
        config.runtime.datacenter = Some("dc1".to_string());
        config.runtime.environment = "test".to_string();
        config
    }
}

type Shared = Arc<Mutex<MockState>>;

fn record(state: &Shared, method: Method, uri: &Uri, headers: &HeaderMap) -> Result<(), Response> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.lock().unwrap().requests.push(Recorded {
        method,
        path: uri.path().to_string(),
        prefer: header_value("prefer"),
        request_id: header_value("x-request-id"),
    });

    let expected = format!("ApiKey {}:{}", USERNAME, API_KEY);
    if header_value(header::AUTHORIZATION.as_str()).as_deref() != Some(expected.as_str()) {
        return Err((StatusCode::UNAUTHORIZED, "bad credentials").into_response());
    }
    Ok(())
}

async fn list_dcs(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = record(&state, method, &uri, &headers) {
        return rejection;
    }
    let objects = match query.get("symbol").map(String::as_str) {
        Some("dc1") => vec![json!({
            "id": 1,
            "name": "First DC",
            "symbol": "dc1",
            "resource_uri": "/api/v0.1/dc/1/"
        })],
        _ => Vec::new(),
    };
    Json(json!({ "objects": objects })).into_response()
}

async fn list_directors(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = record(&state, method, &uri, &headers) {
        return rejection;
    }
    let objects = match query.get("name").map(String::as_str) {
        Some(DIRECTOR) => vec![json!({ "id": DIRECTOR_ID, "name": DIRECTOR })],
        _ => Vec::new(),
    };
    Json(json!({ "objects": objects })).into_response()
}

async fn create_backend(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = record(&state, method, &uri, &headers) {
        return rejection;
    }
    let prefers_async = headers
        .get("prefer")
        .is_some_and(|v| v.as_bytes() == b"respond-async");

    let (id, queued) = {
        let mut s = state.lock().unwrap();
        s.next_backend_id += 1;
        s.backends.push(body);
        (100 + s.next_backend_id, prefers_async && !s.omit_location)
    };
    let created = json!({ "id": id, "resource_uri": format!("/api/v0.1/backend/{}/", id) });

    if queued {
        let location = format!("/api/v0.1/task/{}/", id);
        (StatusCode::ACCEPTED, [(header::LOCATION, location)], Json(created)).into_response()
    } else {
        (StatusCode::CREATED, Json(created)).into_response()
    }
}

async fn delete_backend(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    if let Err(rejection) = record(&state, method, &uri, &headers) {
        return rejection;
    }
    let mut s = state.lock().unwrap();
    if s.fail_delete {
        return (StatusCode::INTERNAL_SERVER_ERROR, "delete failed").into_response();
    }
    s.deleted.push(id);
    StatusCode::NO_CONTENT.into_response()
}

async fn task_status(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = record(&state, method, &uri, &headers) {
        return rejection;
    }
    let status = state
        .lock()
        .unwrap()
        .task_statuses
        .pop_front()
        .unwrap_or("PENDING");
    let info = if status == "FAILURE" { "varnish reload failed" } else { "" };
    Json(json!({ "status": status, "info": info })).into_response()
}

/// Start a mock VaaS API on an ephemeral port.
pub async fn start_mock_vaas() -> MockVaas {
    let state: Shared = Arc::new(Mutex::new(MockState::default()));

    let app = Router::new()
        .route("/api/v0.1/dc/", get(list_dcs))
        .route("/api/v0.1/director/", get(list_directors))
        .route("/api/v0.1/backend/", post(create_backend))
        .route("/api/v0.1/backend/{id}/", axum::routing::delete(delete_backend))
        .route("/api/v0.1/task/{id}/", get(task_status))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockVaas { addr, state }
}
