use std::{
    collections::VecDeque,
    net::{SocketAddr, TcpListener},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use image_gen_proxy::{app::env::Envy, AppState};
use serde_json::{json, Value};

pub const POLL_INTERVAL_MS: u64 = 10;
pub const MAX_POLL_ATTEMPTS: u32 = 30;

/// Scripted stand-in for the Replicate predictions API.
pub struct FakeReplicate {
    create_response: (StatusCode, Value),
    polls: Mutex<VecDeque<(StatusCode, Value)>>,
    fallback_poll: (StatusCode, Value),
    create_calls: AtomicUsize,
    poll_calls: AtomicUsize,
    last_body: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
}

impl FakeReplicate {
    /// Accepts the submission, then answers polls in order and repeats the last one.
    pub fn with_polls(polls: Vec<(StatusCode, Value)>) -> Self {
        let fallback_poll = polls
            .last()
            .cloned()
            .unwrap_or((StatusCode::OK, prediction("processing", None)));

        Self {
            create_response: (StatusCode::CREATED, prediction("starting", None)),
            polls: Mutex::new(polls.into()),
            fallback_poll,
            create_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
            last_body: Mutex::new(None),
            last_authorization: Mutex::new(None),
        }
    }

    /// Answers the submission with `status` and `body`; polls stay at `processing`.
    pub fn with_create_response(status: StatusCode, body: Value) -> Self {
        Self {
            create_response: (status, body),
            ..Self::with_polls(vec![])
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }
}

pub fn prediction(status: &str, output: Option<Value>) -> Value {
    let mut value = json!({
        "id": "pred-1",
        "version": "test-version",
        "status": status,
        "created_at": "2026-10-18T00:00:00Z",
        "logs": "",
        "metrics": {}
    });

    if let Some(output) = output {
        value["output"] = output;
    }

    value
}

pub fn ok(value: Value) -> (StatusCode, Value) {
    (StatusCode::OK, value)
}

async fn create_prediction(
    State(fake): State<Arc<FakeReplicate>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.create_calls.fetch_add(1, Ordering::SeqCst);
    *fake.last_body.lock().unwrap() = Some(body);
    *fake.last_authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let (status, body) = fake.create_response.clone();
    (status, Json(body))
}

async fn get_prediction(
    State(fake): State<Arc<FakeReplicate>>,
    Path(_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    fake.poll_calls.fetch_add(1, Ordering::SeqCst);

    let next = fake.polls.lock().unwrap().pop_front();
    let (status, body) = next.unwrap_or_else(|| fake.fallback_poll.clone());
    (status, Json(body))
}

fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());

    tokio::spawn(server);
    addr
}

pub fn spawn_replicate(fake: FakeReplicate) -> (Arc<FakeReplicate>, String) {
    let fake = Arc::new(fake);
    let app = Router::new()
        .route("/v1/predictions", post(create_prediction))
        .route("/v1/predictions/:id", get(get_prediction))
        .with_state(fake.clone());

    let addr = serve(app);
    (fake, format!("http://{}/v1", addr))
}

/// A base URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}/v1", addr)
}

pub fn spawn_proxy(replicate_api_url: &str) -> String {
    let envy = Envy {
        app_env: "test".to_string(),
        port: None,
        replicate_api_url: Some(replicate_api_url.to_string()),
        poll_interval_ms: Some(POLL_INTERVAL_MS),
        max_poll_attempts: Some(MAX_POLL_ATTEMPTS),
        request_timeout_secs: Some(5),
        rate_limit_per_second: Some(100),
    };

    let addr = serve(image_gen_proxy::app(AppState {
        envy: Arc::new(envy),
    }));
    format!("http://{}", addr)
}

pub async fn post_generate(proxy_url: &str, body: Value) -> (StatusCode, Value) {
    let res = reqwest::Client::new()
        .post(format!("{}/generate", proxy_url))
        .json(&body)
        .send()
        .await
        .unwrap();

    let status = res.status();
    let body = res.json::<Value>().await.unwrap();
    (status, body)
}
