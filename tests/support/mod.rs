//! In-process stand-ins for the three backend services.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use backend_smoke::Config;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

pub const REGISTER_TOKEN: &str = "register-token";
pub const LOGIN_TOKEN: &str = "login-token";
pub const REPORT_ID: &str = "65f0c0ffee";

/// A mock service bound to an ephemeral port, stopped on drop
pub struct MockService {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn(router: Router) -> MockService {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock service");
    let addr = listener.local_addr().expect("mock service address");
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock service");
    });

    MockService {
        base_url: format!("http://{}/api", addr),
        handle,
    }
}

/// Base URL of a port nothing listens on
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind unused port");
    let addr = listener.local_addr().expect("unused port address");
    drop(listener);
    format!("http://{}/api", addr)
}

pub fn config(auth_url: &str, reports_url: &str, documents_url: &str) -> Config {
    Config {
        auth_url: auth_url.to_string(),
        reports_url: reports_url.to_string(),
        documents_url: documents_url.to_string(),
        health_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(2),
        warmup: Duration::ZERO,
        ..Config::default()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "timestamp": "2024-01-01T00:00:00.000Z" }))
}

// ---------------------------------------------------------------------------
// Auth service

#[derive(Default)]
pub struct AuthState {
    /// Login answers 500 instead of issuing a token
    pub login_broken: bool,
    /// Authorization headers seen by `GET /api/auth/user`
    pub seen_auth: Mutex<Vec<String>>,
}

pub fn auth_router(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/user", get(current_user))
        .with_state(state)
}

async fn register(Json(body): Json<Value>) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(json!({ "token": REGISTER_TOKEN, "user": { "email": body["email"] } })),
    )
}

async fn login(State(state): State<Arc<AuthState>>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "wrongpassword" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "msg": "Invalid credentials" })),
        );
    }
    if state.login_broken {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "msg": "Something went wrong!" })),
        );
    }
    (StatusCode::OK, Json(json!({ "token": LOGIN_TOKEN })))
}

async fn current_user(State(state): State<Arc<AuthState>>, headers: HeaderMap) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.seen_auth.lock().unwrap().push(auth);
    Json(json!({ "name": "Test User" }))
}

// ---------------------------------------------------------------------------
// Reports service

#[derive(Default)]
pub struct ReportsState {
    /// Report creation answers 500
    pub create_broken: bool,
    /// `METHOD path` of every report request, in arrival order
    pub requests: Mutex<Vec<String>>,
    /// Authorization headers of every report request
    pub seen_auth: Mutex<Vec<String>>,
    /// Decoded `search` parameters of list requests
    pub searches: Mutex<Vec<String>>,
}

impl ReportsState {
    fn record(&self, method: &str, path: &str, headers: &HeaderMap) {
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path));
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.seen_auth.lock().unwrap().push(auth);
    }
}

pub fn reports_router(state: Arc<ReportsState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/reports", post(create_report).get(list_reports))
        .route("/api/reports/*rest", get(get_nested).post(post_nested))
        .with_state(state)
}

async fn create_report(
    State(state): State<Arc<ReportsState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("POST", "/reports", &headers);
    if state.create_broken {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "msg": "db down" })));
    }
    (
        StatusCode::CREATED,
        Json(json!({ "_id": REPORT_ID, "title": body["title"] })),
    )
}

async fn list_reports(
    State(state): State<Arc<ReportsState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    state.record("GET", "/reports", &headers);
    if let Some(term) = params.get("search") {
        state.searches.lock().unwrap().push(term.clone());
    }
    Json(json!([{ "_id": REPORT_ID }]))
}

async fn get_nested(
    State(state): State<Arc<ReportsState>>,
    Path(rest): Path<String>,
    headers: HeaderMap,
) -> Json<Value> {
    state.record("GET", &format!("/reports/{}", rest), &headers);
    Json(json!({ "_id": REPORT_ID }))
}

async fn post_nested(
    State(state): State<Arc<ReportsState>>,
    Path(rest): Path<String>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> Json<Value> {
    state.record("POST", &format!("/reports/{}", rest), &headers);
    Json(json!({ "msg": "Dashboard data saved" }))
}

// ---------------------------------------------------------------------------
// Document service

/// Answers `/` with the marker text first, then with the given status
pub fn documents_router(later_status: StatusCode) -> Router {
    let hits = Arc::new(AtomicUsize::new(0));
    Router::new().route(
        "/",
        get(move || {
            let hits = hits.clone();
            async move {
                if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::OK, "API is running...")
                } else {
                    (later_status, "Not Found")
                }
            }
        }),
    )
}

// ---------------------------------------------------------------------------
// Slow service

/// `/health` answers after `health_delay`, every other path after `delay`
pub fn slow_router(health_delay: Duration, delay: Duration) -> Router {
    Router::new()
        .route(
            "/health",
            get(move || async move {
                tokio::time::sleep(health_delay).await;
                Json(json!({ "status": "OK" }))
            }),
        )
        .fallback(move || async move {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, "API is running...")
        })
}
