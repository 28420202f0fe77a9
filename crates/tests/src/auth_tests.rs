use axum::{body::Body, http::{Request, StatusCode}};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, ADMIN_EMAIL, PASSWORD};

#[tokio::test]
async fn register_returns_token_and_cookie() {
    let app = common::test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": "meera@example.com", "password": PASSWORD, "full_name": "Meera" }).to_string(),
        ))
        .unwrap();
    let (status, headers, body) = common::send_raw(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    let cookie = headers.get("set-cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("innovex_session="));
    assert!(cookie.contains("HttpOnly"));

    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["user"]["email"], "meera@example.com");
    assert!(body["access_token"].as_str().is_some());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = common::test_app();
    common::register(&app, "dup@example.com").await;
    let (status, body) = common::post_json(
        &app,
        "/api/auth/register",
        json!({ "email": "DUP@example.com", "password": PASSWORD, "full_name": "Again" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = common::test_app();
    let (status, body) = common::post_json(
        &app,
        "/api/auth/register",
        json!({ "email": "a@example.com", "password": "short", "full_name": "A" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["field_errors"]["password"].is_string());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = common::test_app();
    common::register(&app, "meera@example.com").await;

    for (email, password) in [("meera@example.com", "wrong-password"), ("nobody@example.com", PASSWORD)] {
        let (status, body) = common::post_json(
            &app,
            "/api/auth/login",
            json!({ "email": email, "password": password }),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn login_then_session_reports_role() {
    let app = common::test_app();
    common::admin_token(&app).await;

    let (status, body) = common::post_json(
        &app,
        "/api/auth/login",
        json!({ "email": ADMIN_EMAIL, "password": PASSWORD }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, session) = common::get(&app, "/api/auth/session", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["user"]["email"], ADMIN_EMAIL);
    assert_eq!(session["role"], "admin");
}

#[tokio::test]
async fn session_without_token_is_unauthorized() {
    let app = common::test_app();
    let (status, _) = common::get(&app, "/api/auth/session", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::get(&app, "/api/auth/session", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = common::test_app();
    let token = common::register(&app, "meera@example.com").await;

    let (status, _) = common::post_json(&app, "/api/auth/logout", json!({}), Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::get(&app, "/api/auth/session", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn access_decision_follows_role() {
    let app = common::test_app();

    let (status, body) = common::get(&app, "/api/admin/access", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "redirect_to_login");
    assert_eq!(body["location"], "/admin/login");

    let user = common::register(&app, "student@example.com").await;
    let (_, body) = common::get(&app, "/api/admin/access", Some(&user)).await;
    assert_eq!(body["decision"], "access_denied");
    assert_eq!(body["message"], "You don't have admin privileges to access this page.");

    let admin = common::admin_token(&app).await;
    let (_, body) = common::get(&app, "/api/admin/access", Some(&admin)).await;
    assert_eq!(body["decision"], "granted");
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let app = common::test_app();

    let (status, _) = common::get(&app, "/api/admin/events", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = common::register(&app, "student@example.com").await;
    let (status, body) = common::get(&app, "/api/admin/events", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access Denied");

    let admin = common::admin_token(&app).await;
    let (status, _) = common::get(&app, "/api/admin/events", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn granting_admin_role_opens_the_dashboard() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    let user = common::register(&app, "mentor@example.com").await;

    let (_, team) = common::get(&app, "/api/admin/team", Some(&admin)).await;
    let mentor_id = team
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["email"] == "mentor@example.com")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = common::put_json(
        &app,
        &format!("/api/admin/team/{mentor_id}/role"),
        json!({ "role": "admin" }),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = common::get(&app, "/api/admin/access", Some(&user)).await;
    assert_eq!(body["decision"], "granted");
}
