use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, ApproveRequest, FeatureRequest, Testimonial, UpsertTestimonialRequest};

use super::{deleted, found, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// GET /api/admin/testimonials
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/testimonials",
    responses(
        (status = 200, description = "All testimonials, newest first", body = Vec<Testimonial>)
    ),
    tag = "admin-testimonials"
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    Ok(Json(state.store.list_testimonials().await?))
}

// ---------------------------------------------------------------------------
// POST /api/admin/testimonials
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/admin/testimonials",
    request_body = UpsertTestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "admin-testimonials"
)]
#[tracing::instrument(skip(state, _admin, body), fields(name = %body.name))]
pub async fn create_testimonial(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Json(body): Json<UpsertTestimonialRequest>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    body.validate_request()?;
    let testimonial = state.store.create_testimonial(&body).await?;
    tracing::info!(testimonial_id = %testimonial.id, "testimonial created");
    Ok((StatusCode::CREATED, Json(testimonial)))
}

// ---------------------------------------------------------------------------
// PUT /api/admin/testimonials/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    put,
    path = "/api/admin/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial UUID")),
    request_body = UpsertTestimonialRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = Testimonial),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-testimonials"
)]
pub async fn update_testimonial(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<UpsertTestimonialRequest>,
) -> Result<Json<Testimonial>, AppError> {
    let id = parse_id(&id)?;
    body.validate_request()?;
    let testimonial = found(state.store.update_testimonial(id, &body).await?, "Testimonial")?;
    Ok(Json(testimonial))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/testimonials/{id}/approve
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/testimonials/{id}/approve",
    params(("id" = String, Path, description = "Testimonial UUID")),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Approval flag set", body = Testimonial),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-testimonials"
)]
pub async fn approve_testimonial(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<ApproveRequest>,
) -> Result<Json<Testimonial>, AppError> {
    let id = parse_id(&id)?;
    let testimonial = found(
        state.store.set_testimonial_approved(id, body.is_approved).await?,
        "Testimonial",
    )?;
    Ok(Json(testimonial))
}

// ---------------------------------------------------------------------------
// PATCH /api/admin/testimonials/{id}/feature
// ---------------------------------------------------------------------------

#[utoipa::path(
    patch,
    path = "/api/admin/testimonials/{id}/feature",
    params(("id" = String, Path, description = "Testimonial UUID")),
    request_body = FeatureRequest,
    responses(
        (status = 200, description = "Featured flag set", body = Testimonial),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-testimonials"
)]
pub async fn feature_testimonial(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
    Json(body): Json<FeatureRequest>,
) -> Result<Json<Testimonial>, AppError> {
    let id = parse_id(&id)?;
    let testimonial = found(
        state.store.set_testimonial_featured(id, body.is_featured).await?,
        "Testimonial",
    )?;
    Ok(Json(testimonial))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/testimonials/{id}
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial UUID")),
    responses(
        (status = 204, description = "Testimonial deleted"),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "admin-testimonials"
)]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    _admin: AdminRequired,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    deleted(state.store.delete_testimonial(id).await?, "Testimonial")
}
