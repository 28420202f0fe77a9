use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use shared_types::{
    AppError, CreateRegistrationRequest, EventRegistration, RegistrationWithEvent,
    UpdateRegistrationStatusRequest,
};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// POST /api/events/{id}/registrations
// ---------------------------------------------------------------------------

/// Register for a published event.
///
/// The deadline and capacity checks run atomically with the insert, so two
/// concurrent registrations cannot both take the last seat.
#[utoipa::path(
    post,
    path = "/api/events/{id}/registrations",
    params(("id" = String, Path, description = "Event UUID")),
    request_body = CreateRegistrationRequest,
    responses(
        (status = 201, description = "Registered", body = EventRegistration),
        (status = 404, description = "Event not found or unpublished", body = AppError),
        (status = 409, description = "Registration closed or event full", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "submissions"
)]
#[tracing::instrument(skip(state, body), fields(email = %body.email))]
pub async fn register_for_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<EventRegistration>), AppError> {
    let event_id = parse_id(&id)?;
    body.validate_request()?;

    let registration = state
        .store
        .register_for_event(event_id, &body, Utc::now())
        .await?;

    tracing::info!(%event_id, registration_id = %registration.id, "event registration received");
    Ok((StatusCode::CREATED, Json(registration)))
}

// ---------------------------------------------------------------------------
// GET /api/admin/registrations
// ---------------------------------------------------------------------------

/// All registrations with their event titles, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/registrations",
    responses(
        (status = 200, description = "Registrations", body = Vec<RegistrationWithEvent>)
    ),
    tag = "admin-registrations"
)]
pub async fn list_registrations(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<RegistrationWithEvent>>, AppError> {
    Ok(Json(state.store.list_registrations().await?))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/registrations/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/registrations/{id}/status",
    params(("id" = String, Path, description = "Registration UUID")),
    request_body = UpdateRegistrationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = EventRegistration),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-registrations"
)]
pub async fn update_registration_status(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<UpdateRegistrationStatusRequest>,
) -> Result<Json<EventRegistration>, AppError> {
    let id = parse_id(&id)?;
    let registration = found(
        state.store.set_registration_status(id, body.status).await?,
        "Registration",
    )?;
    Ok(Json(registration))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/registrations/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/registrations/{id}",
    params(("id" = String, Path, description = "Registration UUID")),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-registrations"
)]
pub async fn delete_registration(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_registration(id).await?, "Registration")
}
