use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, Event, PublishRequest, UpsertEventRequest};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// GET /api/admin/events
// ---------------------------------------------------------------------------

/// Every event, newest first, published or not.
#[utoipa::path(
    get,
    path = "/api/admin/events",
    responses(
        (status = 200, description = "All events", body = Vec<Event>),
        (status = 403, description = "Not an admin", body = AppError)
    ),
    tag = "admin-events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.store.list_events().await?))
}

// ---------------------------------------------------------------------------
// POST /api/admin/events
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/admin/events",
    request_body = UpsertEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "admin-events"
)]
#[tracing::instrument(skip(state, _admin, body), fields(title = %body.title))]
pub async fn create_event(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Json(body): Json<UpsertEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    body.validate_request()?;
    let event = state.store.create_event(&body).await?;
    tracing::info!(event_id = %event.id, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

// ---------------------------------------------------------------------------
// PUT /api/admin/events/{id}
// ---------------------------------------------------------------------------

/// Replace an event's fields. Id and creation time are kept.
#[utoipa::path(
    put,
    path = "/api/admin/events/{id}",
    params(("id" = String, Path, description = "Event UUID")),
    request_body = UpsertEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-events"
)]
#[tracing::instrument(skip(state, _admin, body))]
pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<UpsertEventRequest>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id)?;
    body.validate_request()?;
    let event = found(state.store.update_event(id, &body).await?, "Event")?;
    Ok(Json(event))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/events/{id}/publish
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/events/{id}/publish",
    params(("id" = String, Path, description = "Event UUID")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Publish flag set", body = Event),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-events"
)]
pub async fn publish_event(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<PublishRequest>,
) -> Result<Json<Event>, AppError> {
    let id = parse_id(&id)?;
    let event = found(
        state.store.set_event_published(id, body.is_published).await?,
        "Event",
    )?;
    Ok(Json(event))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/events/{id}
// ---------------------------------------------------------------------------

/// Delete an event along with its registrations.
#[utoipa::path(
    delete,
    path = "/api/admin/events/{id}",
    params(("id" = String, Path, description = "Event UUID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-events"
)]
#[tracing::instrument(skip(state, _admin))]
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_event(id).await?, "Event")
}
