use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::db::AppState;
use crate::mailgun::verify_webhook_signature;

/// Flattened Mailgun event callback.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MailgunWebhookPayload {
    pub timestamp: String,
    pub token: String,
    pub signature: String,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}

/// Events after which the address should stop receiving the newsletter.
const DEACTIVATING_EVENTS: [&str; 2] = ["bounced", "complained"];

/// Receive a Mailgun delivery event.
///
/// Always answers 200 so Mailgun does not retry; bad signatures and store
/// failures are only logged.
#[utoipa::path(
    post,
    path = "/webhooks/mailgun",
    request_body = MailgunWebhookPayload,
    responses(
        (status = 200, description = "Event accepted")
    ),
    tag = "webhooks"
)]
#[tracing::instrument(skip(state, payload), fields(event = ?payload.event))]
pub async fn mailgun_webhook(
    State(state): State<AppState>,
    Json(payload): Json<MailgunWebhookPayload>,
) -> StatusCode {
    let signing_key = state
        .settings
        .mailgun_webhook_signing_key
        .as_deref()
        .unwrap_or_default();

    if !verify_webhook_signature(signing_key, &payload.timestamp, &payload.token, &payload.signature) {
        tracing::warn!("rejected Mailgun webhook with invalid signature");
        return StatusCode::OK;
    }

    let (Some(event), Some(recipient)) = (payload.event.as_deref(), payload.recipient.as_deref()) else {
        return StatusCode::OK;
    };

    if DEACTIVATING_EVENTS.contains(&event) {
        match state.store.set_active_by_email(recipient, false).await {
            Ok(true) => tracing::info!(event, "newsletter subscription deactivated"),
            Ok(false) => tracing::debug!(event, "webhook recipient is not a subscriber"),
            Err(e) => tracing::error!(error = %e, "failed to deactivate subscription"),
        }
    }

    StatusCode::OK
}
