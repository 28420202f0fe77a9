use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common;

fn notification() -> Value {
    json!({
        "type": "career",
        "applicantName": "Divya Nair",
        "applicantEmail": "divya@example.com",
        "position": "Technical Project Manager Intern",
        "college": "Anna University",
        "phone": "+91 90000 00000",
    })
}

#[tokio::test]
async fn notify_sends_admin_alert_and_confirmation() {
    let app = common::test_app();
    let (status, body) = common::post_json(&app, "/api/notify-application", notification(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["adminEmail"]["id"], "<msg-1@mailgun.test>");
    assert_eq!(body["applicantEmail"]["id"], "<msg-2@mailgun.test>");

    let sent = app.mailer.sent();
    assert_eq!(sent[0].subject, "New Career Application: Divya Nair");
    assert_eq!(sent[1].to, "divya@example.com");
    assert_eq!(
        sent[1].subject,
        "Application Received - Technical Project Manager Intern at Innovex Arena"
    );
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let app = common::test_app();
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/notify-application")
        .header("origin", "https://innovexarena.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,apikey")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = common::send_raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");

    let methods = headers["access-control-allow-methods"].to_str().unwrap().to_uppercase();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));

    let allowed = headers["access-control-allow-headers"].to_str().unwrap().to_lowercase();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "missing {name}");
    }
}

#[tokio::test]
async fn cross_origin_post_carries_cors_header() {
    let app = common::test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/notify-application")
        .header("origin", "https://innovexarena.com")
        .header("content-type", "application/json")
        .body(Body::from(notification().to_string()))
        .unwrap();
    let (status, headers, _) = common::send_raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn unreadable_body_is_500_with_error() {
    let app = common::test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/notify-application")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = common::send(&app, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(app.mailer.sent().is_empty());

    let (status, body) = common::post_json(
        &app,
        "/api/notify-application",
        json!({ "type": "volunteer", "applicantName": "X", "applicantEmail": "x@example.com", "position": "Y" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn mail_failure_is_500_with_provider_message() {
    let app = common::test_app();
    app.mailer.fail_sends();
    let (status, body) = common::post_json(&app, "/api/notify-application", notification(), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Mailgun API error (401 Unauthorized): Forbidden" }));
}
