use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use shared_types::{
    AppError, Application, ApplicationNotification, ApplicationQuery, SubmitApplicationRequest,
    UpdateApplicationStatusRequest,
};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;
use crate::mailgun::send_application_emails;
use crate::repo::records;

// ---------------------------------------------------------------------------
// POST /api/applications
// ---------------------------------------------------------------------------

/// Submit an internship or career application.
///
/// The admin alert and applicant confirmation go out after the row is
/// stored. A delivery failure is logged and the submission still succeeds.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = SubmitApplicationRequest,
    responses(
        (status = 201, description = "Application received", body = Application),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "submissions"
)]
#[tracing::instrument(skip(state, body), fields(kind = body.kind.as_str(), email = %body.email))]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(body): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    body.validate_request()?;

    let application = state
        .store
        .create_application(records::new_application(&body, Utc::now()))
        .await?;
    tracing::info!(application_id = %application.id, "application received");

    let notification = ApplicationNotification::from(&application);
    if let Err(e) = send_application_emails(state.mailer.as_ref(), &state.settings, &notification).await {
        tracing::warn!(application_id = %application.id, error = %e, "application notification failed");
    }

    Ok((StatusCode::CREATED, Json(application)))
}

// ---------------------------------------------------------------------------
// GET /api/admin/applications
// ---------------------------------------------------------------------------

/// Applications, newest first. `?kind=internship` or `?kind=career` selects
/// one tab; no kind returns both.
#[utoipa::path(
    get,
    path = "/api/admin/applications",
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Applications", body = Vec<Application>)
    ),
    tag = "admin-applications"
)]
pub async fn list_applications(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Query(params): Query<ApplicationQuery>,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(state.store.list_applications(params.kind).await?))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/applications/{id}/status
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/applications/{id}/status",
    params(("id" = String, Path, description = "Application UUID")),
    request_body = UpdateApplicationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Application),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-applications"
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<Application>, AppError> {
    let id = parse_id(&id)?;
    let application = found(
        state.store.set_application_status(id, body.status).await?,
        "Application",
    )?;
    Ok(Json(application))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/applications/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/applications/{id}",
    params(("id" = String, Path, description = "Application UUID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-applications"
)]
pub async fn delete_application(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_application(id).await?, "Application")
}
