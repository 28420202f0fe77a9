use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common;

// ── Event registration ──────────────────────────────────────────────

#[tokio::test]
async fn registration_is_created_with_blank_fields_as_null() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let event = common::create_event(&app, &admin, common::event_body("AI Workshop")).await;
    let id = event["id"].as_str().unwrap();

    let (status, body) = common::post_json(
        &app,
        &format!("/api/events/{id}/registrations"),
        common::registration_body("priya@example.com"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["event_id"], id);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["phone"], serde_json::Value::Null);
    assert_eq!(body["college"], "IIT Madras");
}

#[tokio::test]
async fn registration_for_unpublished_or_unknown_event_is_not_found() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let mut draft = common::event_body("Draft Event");
    draft["is_published"] = json!(false);
    let event = common::create_event(&app, &admin, draft).await;

    for id in [event["id"].as_str().unwrap().to_string(), uuid::Uuid::new_v4().to_string()] {
        let (status, body) = common::post_json(
            &app,
            &format!("/api/events/{id}/registrations"),
            common::registration_body("priya@example.com"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Event not found");
    }
}

#[tokio::test]
async fn registration_after_deadline_is_refused() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let mut body = common::event_body("Closed Bootcamp");
    body["registration_deadline"] = json!((chrono::Utc::now() - chrono::Duration::hours(1)).to_rfc3339());
    let event = common::create_event(&app, &admin, body).await;

    let (status, body) = common::post_json(
        &app,
        &format!("/api/events/{}/registrations", event["id"].as_str().unwrap()),
        common::registration_body("priya@example.com"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Registration for this event has closed");
}

#[tokio::test]
async fn full_event_refuses_until_a_registration_is_rejected() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let mut body = common::event_body("Small Masterclass");
    body["max_participants"] = json!(1);
    let event = common::create_event(&app, &admin, body).await;
    let uri = format!("/api/events/{}/registrations", event["id"].as_str().unwrap());

    let (status, first) =
        common::post_json(&app, &uri, common::registration_body("one@example.com"), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        common::post_json(&app, &uri, common::registration_body("two@example.com"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This event is full");

    let (status, _) = common::patch_json(
        &app,
        &format!("/api/admin/registrations/{}/status", first["id"].as_str().unwrap()),
        json!({ "status": "rejected" }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        common::post_json(&app, &uri, common::registration_body("two@example.com"), None).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn registration_requires_name_and_valid_email() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let event = common::create_event(&app, &admin, common::event_body("AI Workshop")).await;

    let (status, body) = common::post_json(
        &app,
        &format!("/api/events/{}/registrations", event["id"].as_str().unwrap()),
        json!({ "name": "Priya", "email": "not-an-email" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["email"], "Valid email is required");
}

// ── Applications ────────────────────────────────────────────────────

#[tokio::test]
async fn application_is_stored_and_both_emails_sent() {
    let app = common::test_app();
    let (status, body) =
        common::post_json(&app, "/api/applications", common::application_body("internship"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "internship");
    assert_eq!(body["status"], "pending");

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "innovexarena@gmail.com");
    assert_eq!(sent[0].subject, "New Internship Application: Arjun Rao");
    assert_eq!(sent[1].to, "arjun@example.com");
    assert_eq!(
        sent[1].subject,
        "Application Received - Software Developer Intern at Innovex Arena"
    );
}

#[tokio::test]
async fn application_survives_mail_failure() {
    let app = common::test_app();
    app.mailer.fail_sends();
    let (status, _) =
        common::post_json(&app, "/api/applications", common::application_body("career"), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let admin = common::admin_token(&app).await;
    let (_, rows) = common::get(&app, "/api/admin/applications?kind=career", Some(&admin)).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn application_with_bad_portfolio_url_is_rejected() {
    let app = common::test_app();
    let mut body = common::application_body("internship");
    body["portfolio_url"] = json!("github dot com");
    let (status, body) = common::post_json(&app, "/api/applications", body, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field_errors"]["portfolio_url"], "Portfolio must be a valid URL");
    assert!(app.mailer.sent().is_empty());
}

// ── Contact ─────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_message_is_stored_unread() {
    let app = common::test_app();
    let (status, body) = common::post_json(
        &app,
        "/api/contact",
        json!({ "name": "Meera", "email": "meera@example.com", "subject": "", "message": "Campus workshop?" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_read"], false);
    assert_eq!(body["subject"], serde_json::Value::Null);
}

#[tokio::test]
async fn contact_requires_message() {
    let app = common::test_app();
    let (status, body) = common::post_json(
        &app,
        "/api/contact",
        json!({ "name": "Meera", "email": "meera@example.com", "message": "" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Message is required");
}

// ── Newsletter ──────────────────────────────────────────────────────

#[tokio::test]
async fn newsletter_subscribe_lifecycle() {
    let app = common::test_app();

    let (status, body) =
        common::post_json(&app, "/api/newsletter", json!({ "email": "Reader@Example.com" }), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "reader@example.com");
    assert_eq!(body["is_active"], true);

    let (status, body) =
        common::post_json(&app, "/api/newsletter", json!({ "email": "reader@example.com" }), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This email is already subscribed");

    let (status, body) = common::post_json(
        &app,
        "/api/newsletter/unsubscribe",
        json!({ "email": "reader@example.com" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "You have been unsubscribed");

    let (status, body) =
        common::post_json(&app, "/api/newsletter", json!({ "email": "reader@example.com" }), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn unsubscribe_unknown_email_is_not_found() {
    let app = common::test_app();
    let (status, body) = common::post_json(
        &app,
        "/api/newsletter/unsubscribe",
        json!({ "email": "ghost@example.com" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Subscription not found");
}
