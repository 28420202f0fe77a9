use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{AppError, AppRole, ACCESS_DENIED_TITLE};

use super::jwt::Claims;
use crate::db::AppState;

/// Extractor that requires a live session. Returns 401 otherwise.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Extractor that optionally extracts the session claims. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Extractor guarding the admin API: 401 without a session, 403 unless the
/// user holds the admin role. Moderators and plain users are refused.
pub struct AdminRequired(pub Claims);

impl FromRequestParts<AppState> for AdminRequired {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthRequired(claims) = AuthRequired::from_request_parts(parts, state).await?;

        match state.store.role_of(claims.sub).await? {
            Some(AppRole::Admin) => Ok(AdminRequired(claims)),
            _ => {
                tracing::info!(user_id = %claims.sub, "admin access denied");
                Err(AppError::forbidden(ACCESS_DENIED_TITLE))
            }
        }
    }
}
