use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{
    AppError, MessageResponse, NewsletterSubscription, SetActiveRequest, SubscribeRequest,
};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;
use crate::repo::SubscribeOutcome;

// ---------------------------------------------------------------------------
// POST /api/newsletter
// ---------------------------------------------------------------------------

/// Subscribe an address. A previously unsubscribed address is reactivated
/// (200); a new one is created (201); an active one is a conflict.
#[utoipa::path(
    post,
    path = "/api/newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = NewsletterSubscription),
        (status = 200, description = "Subscription reactivated", body = NewsletterSubscription),
        (status = 409, description = "Already subscribed", body = AppError),
        (status = 422, description = "Invalid email", body = AppError)
    ),
    tag = "submissions"
)]
#[tracing::instrument(skip(state, body))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<NewsletterSubscription>), AppError> {
    body.validate_request()?;

    let outcome = state.store.subscribe(&body.email).await?;
    let status = match outcome {
        SubscribeOutcome::Created(_) => StatusCode::CREATED,
        SubscribeOutcome::Reactivated(_) => StatusCode::OK,
    };
    let subscription = outcome.subscription();
    tracing::info!(subscription_id = %subscription.id, %status, "newsletter signup");

    Ok((status, Json(subscription)))
}

// ---------------------------------------------------------------------------
// POST /api/newsletter/unsubscribe
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/newsletter/unsubscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Unsubscribed", body = MessageResponse),
        (status = 404, description = "Unknown address", body = AppError)
    ),
    tag = "submissions"
)]
#[tracing::instrument(skip(state, body))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    body.validate_request()?;

    if !state.store.set_active_by_email(&body.email, false).await? {
        return Err(AppError::not_found("Subscription not found"));
    }

    Ok(Json(MessageResponse {
        message: "You have been unsubscribed".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/admin/newsletter
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/newsletter",
    responses(
        (status = 200, description = "Subscriptions, newest first", body = Vec<NewsletterSubscription>)
    ),
    tag = "admin-newsletter"
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<NewsletterSubscription>>, AppError> {
    Ok(Json(state.store.list_subscriptions().await?))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/newsletter/{id}/active
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/newsletter/{id}/active",
    params(("id" = String, Path, description = "Subscription UUID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Active flag set", body = NewsletterSubscription),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-newsletter"
)]
pub async fn set_subscription_active(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<SetActiveRequest>,
) -> Result<Json<NewsletterSubscription>, AppError> {
    let id = parse_id(&id)?;
    let subscription = found(
        state.store.set_subscription_active(id, body.is_active).await?,
        "Subscription",
    )?;
    Ok(Json(subscription))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/newsletter/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/newsletter/{id}",
    params(("id" = String, Path, description = "Subscription UUID")),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-newsletter"
)]
pub async fn delete_subscription(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_subscription(id).await?, "Subscription")
}
