use axum::{extract::State, Json};
use shared_types::{AppError, DashboardStats};

use crate::auth::extractors::AdminRequired;
use crate::db::AppState;

/// Overview tab counters.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Not an admin", body = AppError)
    ),
    tag = "admin"
)]
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminRequired,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.store.dashboard_stats().await?))
}
