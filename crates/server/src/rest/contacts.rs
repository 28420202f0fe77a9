use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use shared_types::{AppError, ContactSubmission, CreateContactRequest, MarkReadRequest};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;
use crate::repo::records;

// ---------------------------------------------------------------------------
// POST /api/contact
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactSubmission),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "submissions"
)]
#[tracing::instrument(skip(state, body), fields(email = %body.email))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactSubmission>), AppError> {
    body.validate_request()?;
    let contact = state
        .store
        .create_contact(records::new_contact(&body, Utc::now()))
        .await?;
    tracing::info!(contact_id = %contact.id, "contact message received");
    Ok((StatusCode::CREATED, Json(contact)))
}

// ---------------------------------------------------------------------------
// GET /api/admin/contacts
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/contacts",
    responses(
        (status = 200, description = "Contact messages, newest first", body = Vec<ContactSubmission>)
    ),
    tag = "admin-contacts"
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<ContactSubmission>>, AppError> {
    Ok(Json(state.store.list_contacts().await?))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/contacts/{id}/read
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/contacts/{id}/read",
    params(("id" = String, Path, description = "Contact UUID")),
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Read flag set", body = ContactSubmission),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-contacts"
)]
pub async fn mark_contact_read(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<MarkReadRequest>,
) -> Result<Json<ContactSubmission>, AppError> {
    let id = parse_id(&id)?;
    let contact = found(state.store.set_contact_read(id, body.is_read).await?, "Contact")?;
    Ok(Json(contact))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/contacts/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/contacts/{id}",
    params(("id" = String, Path, description = "Contact UUID")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-contacts"
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_contact(id).await?, "Contact")
}
