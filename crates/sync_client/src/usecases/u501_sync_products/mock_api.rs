//! In-process Sync API for tests, built on axum.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

#[derive(Clone)]
pub struct MockConfig {
    pub sync_status: u16,
    pub sync_body: Value,
    pub history_body: Value,
    /// Задержка ответа только для первого `POST /sync-products`
    pub first_sync_delay: Option<Duration>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            sync_status: 200,
            sync_body: json!({
                "sync_id": "sync-1",
                "status": "PROCESSING",
                "message": "Sync started",
                "timestamp": "2024-05-01T08:00:00Z"
            }),
            history_body: json!({ "items": [], "page": 1, "size": 10, "has_more": false }),
            first_sync_delay: None,
        }
    }
}

#[derive(Clone)]
struct MockState {
    config: MockConfig,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    sync_calls: Arc<AtomicUsize>,
}

pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockApi {
    pub async fn start(config: MockConfig) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            config,
            requests: requests.clone(),
            sync_calls: Arc::new(AtomicUsize::new(0)),
        };

        let app = Router::new()
            .route("/sync-products", post(sync_products))
            .route("/sync-history", get(sync_history))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn record(state: &MockState, uri: &Uri, headers: &HeaderMap, body: &str) {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: serde_json::from_str(body).unwrap_or(Value::Null),
    });
}

async fn sync_products(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    record(&state, &uri, &headers, &body);
    let call = state.sync_calls.fetch_add(1, Ordering::SeqCst);
    if call == 0 {
        if let Some(delay) = state.config.first_sync_delay {
            tokio::time::sleep(delay).await;
        }
    }
    let status = StatusCode::from_u16(state.config.sync_status).unwrap();
    (status, Json(state.config.sync_body.clone()))
}

async fn sync_history(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    record(&state, &uri, &headers, "");
    (StatusCode::OK, Json(state.config.history_body.clone()))
}
