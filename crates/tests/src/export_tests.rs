use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common;

async fn export(app: &common::TestApp, dataset: &str, token: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/admin/export/{dataset}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = common::send_raw(app, req).await;
    (status, headers, String::from_utf8(body).unwrap())
}

#[tokio::test]
async fn registrations_export_has_headers_and_event_title() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let event = common::create_event(&app, &admin, common::event_body("Hack, Night")).await;
    common::post_json(
        &app,
        &format!("/api/events/{}/registrations", event["id"].as_str().unwrap()),
        common::registration_body("priya@example.com"),
        None,
    )
    .await;

    let (status, headers, csv) = export(&app, "registrations", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "text/csv; charset=utf-8");
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=\"event-registrations.csv\""
    );

    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Name,Email,Phone,College,Event,Status,Registered At"
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("Priya Sharma,priya@example.com,,IIT Madras,\"Hack, Night\",pending,"));
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn intern_and_career_exports_are_separate() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(&app, "/api/applications", common::application_body("internship"), None).await;

    let (status, headers, csv) = export(&app, "interns", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=\"intern-applications.csv\""
    );
    assert_eq!(
        csv.lines().next().unwrap(),
        "Name,Email,Phone,College,Year,Position,Portfolio,Resume,Status,Applied At"
    );
    assert_eq!(csv.lines().count(), 2);

    let (status, body) = common::get(&app, "/api/admin/export/careers", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No data to export");
}

#[tokio::test]
async fn newsletter_export_shows_active_state() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(&app, "/api/newsletter", json!({ "email": "one@example.com" }), None).await;
    common::post_json(&app, "/api/newsletter", json!({ "email": "two@example.com" }), None).await;
    common::post_json(
        &app,
        "/api/newsletter/unsubscribe",
        json!({ "email": "two@example.com" }),
        None,
    )
    .await;

    let (_, _, csv) = export(&app, "newsletter", &admin).await;
    assert_eq!(csv.lines().next().unwrap(), "Email,Status,Subscribed At");
    assert!(csv.lines().any(|l| l.starts_with("one@example.com,Active,")));
    assert!(csv.lines().any(|l| l.starts_with("two@example.com,Inactive,")));
}

#[tokio::test]
async fn unknown_dataset_is_bad_request() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let (status, body) = common::get(&app, "/api/admin/export/contacts", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown export dataset: contacts");
}

#[tokio::test]
async fn export_requires_admin() {
    let app = common::test_app();
    let user = common::register(&app, "student@example.com").await;
    let (status, _) = common::get(&app, "/api/admin/export/newsletter", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
