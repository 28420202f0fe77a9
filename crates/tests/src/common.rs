use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server::config::Settings;
use server::db::AppState;
use server::mailgun::Mailer;
use server::rate_limit::RateLimitState;
use server::repo::MemoryStore;
use server::storage::{MemoryObjectStore, ObjectStore};
use shared_types::EmailReceipt;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@innovexarena.com";
pub const PASSWORD: &str = "correct-horse-battery";
pub const WEBHOOK_KEY: &str = "test-webhook-signing-key";

/// One email handed to the mailer.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
}

/// Mailer that records every message and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<EmailReceipt, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("Mailgun API error (401 Unauthorized): Forbidden".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
        });
        Ok(EmailReceipt {
            id: Some(format!("<msg-{}@mailgun.test>", sent.len())),
            message: "Queued. Thank you.".to_string(),
        })
    }
}

/// A router over in-memory backends plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_settings() -> Settings {
    Settings {
        jwt_secret: "integration-test-secret".to_string(),
        admin_email: Some(ADMIN_EMAIL.to_string()),
        mailgun_webhook_signing_key: Some(WEBHOOK_KEY.to_string()),
        ..Settings::default()
    }
}

fn build(rate_limit: Option<RateLimitState>, with_objects: bool) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let objects = Arc::new(MemoryObjectStore::new());
    let mailer = Arc::new(RecordingMailer::default());

    let state = AppState {
        store: store.clone(),
        objects: if with_objects {
            Some(objects.clone() as Arc<dyn ObjectStore>)
        } else {
            None
        },
        mailer: mailer.clone(),
        settings: Arc::new(test_settings()),
    };

    TestApp {
        router: server::openapi::api_router(state, rate_limit),
        store,
        objects,
        mailer,
    }
}

pub fn test_app() -> TestApp {
    build(None, true)
}

/// Same as `test_app` but public submissions are limited to `max` per minute.
pub fn test_app_rate_limited(max: u32) -> TestApp {
    build(Some(RateLimitState::new(max, Duration::from_secs(60))), true)
}

/// No object store configured.
pub fn test_app_without_uploads() -> TestApp {
    build(None, false)
}

// ── Requests ────────────────────────────────────────────────────────

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(t) => builder.header("authorization", format!("Bearer {t}")),
        None => builder,
    }
}

pub async fn get(app: &TestApp, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let req = builder("GET", uri, token).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    json_request(app, "POST", uri, body, token).await
}

pub async fn put_json(app: &TestApp, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    json_request(app, "PUT", uri, body, token).await
}

pub async fn patch_json(app: &TestApp, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    json_request(app, "PATCH", uri, body, token).await
}

pub async fn delete(app: &TestApp, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let req = builder("DELETE", uri, token).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn json_request(
    app: &TestApp,
    method: &str,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let req = builder(method, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// POST a single-file multipart form with the file under `file`.
pub async fn post_file(
    app: &TestApp,
    uri: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    token: Option<&str>,
) -> (StatusCode, Value) {
    let boundary = "----innovex-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let req = builder("POST", uri, token)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

/// Send a request and return the status, headers and raw body.
pub async fn send_raw(app: &TestApp, req: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, headers, body.to_vec())
}

/// Send a request through the router and parse the JSON response.
/// Empty bodies come back as `Value::Null`.
pub async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_raw(app, req).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into()))
    };
    (status, value)
}

// ── Fixtures ────────────────────────────────────────────────────────

/// Register an account and return its access token.
pub async fn register(app: &TestApp, email: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/auth/register",
        json!({ "email": email, "password": PASSWORD, "full_name": "Test User" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

/// Token of the bootstrap admin account.
pub async fn admin_token(app: &TestApp) -> String {
    register(app, ADMIN_EMAIL).await
}

pub fn event_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Hands-on session with mentors",
        "event_type": "workshop",
        "event_date": (chrono::Utc::now() + chrono::Duration::days(14)).to_rfc3339(),
        "location": "Chennai",
        "is_published": true,
    })
}

/// Create an event through the admin API and return it.
pub async fn create_event(app: &TestApp, token: &str, body: Value) -> Value {
    let (status, event) = post_json(app, "/api/admin/events", body, Some(token)).await;
    assert_eq!(status, StatusCode::CREATED, "create event failed: {event}");
    event
}

pub fn registration_body(email: &str) -> Value {
    json!({ "name": "Priya Sharma", "email": email, "phone": "", "college": "IIT Madras" })
}

pub fn application_body(kind: &str) -> Value {
    json!({
        "kind": kind,
        "name": "Arjun Rao",
        "email": "arjun@example.com",
        "phone": "+91 98765 43210",
        "college": "NIT Trichy",
        "year_of_study": "3rd Year",
        "position": "Software Developer Intern",
    })
}
