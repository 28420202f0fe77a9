use axum::http::StatusCode;
use hmac::{Hmac, Mac};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sha2::Sha256;

use crate::common::{self, WEBHOOK_KEY};

fn sign(key: &str, timestamp: &str, token: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes()).unwrap();
    mac.update(timestamp.as_bytes());
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn payload(event: &str, recipient: &str, signature: String) -> Value {
    json!({
        "timestamp": "1760000000",
        "token": "0123456789abcdef",
        "signature": signature,
        "event": event,
        "recipient": recipient,
    })
}

async fn subscriber_active(app: &common::TestApp, admin: &str, email: &str) -> bool {
    let (_, rows) = common::get(app, "/api/admin/newsletter", Some(admin)).await;
    rows.as_array()
        .unwrap()
        .iter()
        .find(|s| s["email"] == email)
        .unwrap()["is_active"]
        .as_bool()
        .unwrap()
}

#[tokio::test]
async fn signed_bounce_deactivates_subscriber() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(&app, "/api/newsletter", json!({ "email": "reader@example.com" }), None).await;

    let signature = sign(WEBHOOK_KEY, "1760000000", "0123456789abcdef");
    let (status, _) = common::post_json(
        &app,
        "/webhooks/mailgun",
        payload("bounced", "reader@example.com", signature),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!subscriber_active(&app, &admin, "reader@example.com").await);
}

#[tokio::test]
async fn bad_signature_is_acknowledged_but_ignored() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(&app, "/api/newsletter", json!({ "email": "reader@example.com" }), None).await;

    let forged = sign("some-other-key", "1760000000", "0123456789abcdef");
    let (status, _) = common::post_json(
        &app,
        "/webhooks/mailgun",
        payload("complained", "reader@example.com", forged),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(subscriber_active(&app, &admin, "reader@example.com").await);
}

#[tokio::test]
async fn delivered_event_changes_nothing() {
    let app = common::test_app();
    let admin = common::admin_token(&app).await;
    common::post_json(&app, "/api/newsletter", json!({ "email": "reader@example.com" }), None).await;

    let signature = sign(WEBHOOK_KEY, "1760000000", "0123456789abcdef");
    let (status, _) = common::post_json(
        &app,
        "/webhooks/mailgun",
        payload("delivered", "reader@example.com", signature.clone()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(subscriber_active(&app, &admin, "reader@example.com").await);

    let (status, _) = common::post_json(
        &app,
        "/webhooks/mailgun",
        payload("bounced", "stranger@example.com", signature),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
