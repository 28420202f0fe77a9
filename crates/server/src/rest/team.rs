use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{AppError, SetRoleRequest, TeamMember, UserRole};

use super::{deleted, parse_id};
use crate::auth::extractors::AdminRequired;
use crate::db::AppState;

// ---------------------------------------------------------------------------
// GET /api/admin/team
// ---------------------------------------------------------------------------

/// Every account with its role, if it has one.
#[utoipa::path(
    get,
    path = "/api/admin/team",
    responses(
        (status = 200, description = "Team members", body = Vec<TeamMember>)
    ),
    tag = "admin-team"
)]
pub async fn list_team(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    Ok(Json(state.store.list_team().await?))
}

// ---------------------------------------------------------------------------
// PUT /api/admin/team/{user_id}/role
// ---------------------------------------------------------------------------

/// Grant or change a user's role. A user holds at most one role.
#[utoipa::path(
    put,
    path = "/api/admin/team/{user_id}/role",
    params(("user_id" = String, Path, description = "User UUID")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role set", body = UserRole),
        (status = 404, description = "User not found", body = AppError)
    ),
    tag = "admin-team"
)]
#[tracing::instrument(skip(state, admin, body), fields(role = body.role.as_str()))]
pub async fn set_role(
    State(state): State<AppState>,
    admin: AdminRequired,
    Path(user_id): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> Result<Json<UserRole>, AppError> {
    let user_id = parse_id(&user_id)?;
    let role = state.store.set_role(user_id, body.role).await?;
    tracing::info!(%user_id, granted_by = %admin.0.sub, "role set");
    Ok(Json(role))
}

// ---------------------------------------------------------------------------
// DELETE /api/admin/team/{user_id}/role
// ---------------------------------------------------------------------------

#[utoipa::path(
    delete,
    path = "/api/admin/team/{user_id}/role",
    params(("user_id" = String, Path, description = "User UUID")),
    responses(
        (status = 204, description = "Role removed"),
        (status = 404, description = "User has no role", body = AppError)
    ),
    tag = "admin-team"
)]
#[tracing::instrument(skip(state, admin))]
pub async fn remove_role(
    State(state): State<AppState>,
    admin: AdminRequired,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_id(&user_id)?;
    let status = deleted(state.store.remove_role(user_id).await?, "Role")?;
    tracing::info!(%user_id, removed_by = %admin.0.sub, "role removed");
    Ok(status)
}
