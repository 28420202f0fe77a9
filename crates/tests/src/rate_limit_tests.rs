use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common;

fn contact_from(ip: &str) -> Request<Body> {
    let body = json!({ "name": "Meera", "email": "meera@example.com", "message": "Hello" });
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .header("x-forwarded-for", format!("{ip}, 10.0.0.1"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn submissions_over_the_limit_are_refused() {
    let app = common::test_app_rate_limited(2);

    for _ in 0..2 {
        let (status, _) = common::send(&app, contact_from("203.0.113.7")).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = common::send(&app, contact_from("203.0.113.7")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body,
        json!({ "kind": "RateLimited", "message": "Too many submissions. Please try again later." })
    );

    let (status, _) = common::send(&app, contact_from("198.51.100.4")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn limit_covers_every_submission_route() {
    let app = common::test_app_rate_limited(1);

    let (status, _) = common::post_json(&app, "/api/newsletter", json!({ "email": "a@example.com" }), None).await;
    assert_eq!(status, StatusCode::CREATED);

    // No forwarding headers: all anonymous callers share one bucket.
    let (status, _) =
        common::post_json(&app, "/api/applications", common::application_body("career"), None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = common::post_json(&app, "/api/notify-application", notification(), None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(app.mailer.sent().is_empty());
}

fn notification() -> Value {
    json!({
        "type": "internship",
        "applicantName": "Divya Nair",
        "applicantEmail": "someone@example.com",
        "position": "Cloud Intern",
        "college": "Anna University",
        "phone": "+91 90000 00000",
    })
}

#[tokio::test]
async fn notify_is_throttled_but_preflight_is_not() {
    let app = common::test_app_rate_limited(1);

    let (status, _) = common::post_json(&app, "/api/notify-application", notification(), None).await;
    assert_eq!(status, StatusCode::OK);
    for _ in 0..4 {
        let (status, _) = common::post_json(&app, "/api/notify-application", notification(), None).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }
    assert_eq!(app.mailer.sent().len(), 2);

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/api/notify-application")
        .header("origin", "https://innovexarena.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = common::send_raw(&app, preflight).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn login_attempts_are_throttled_separately() {
    let app = common::test_app_rate_limited(2);
    common::admin_token(&app).await;

    let login = json!({ "email": common::ADMIN_EMAIL, "password": "guess-one" });
    let (status, body) = common::post_json(&app, "/api/auth/login", login.clone(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{body}");

    let (status, body) = common::post_json(&app, "/api/auth/login", login, None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["message"], "Too many sign-in attempts. Please try again later.");

    // Form submissions keep their own budget.
    let (status, _) = common::post_json(&app, "/api/newsletter", json!({ "email": "a@example.com" }), None).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn reads_and_admin_routes_are_not_limited() {
    let app = common::test_app_rate_limited(1);
    let admin = common::admin_token(&app).await;

    for _ in 0..3 {
        let (status, _) = common::get(&app, "/api/public/events", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = common::get(&app, "/api/admin/stats", Some(&admin)).await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(body, Value::Null);
    }
}
