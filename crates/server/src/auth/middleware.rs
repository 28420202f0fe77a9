use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use super::cookies;
use super::jwt::validate_session_token;
use crate::db::AppState;

/// Permissive auth middleware.
///
/// Validates the session token from the cookie (or Bearer header) and, when
/// its session row is still live, inserts `Claims` into the request
/// extensions. Never rejects; extractors decide authorization.
pub async fn auth_middleware(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = cookies::extract_access_token(req.headers()) {
        match validate_session_token(&state.settings.jwt_secret, &token) {
            Ok(claims) => match state.store.session_is_live(claims.sid, claims.sub, Utc::now()).await {
                Ok(true) => {
                    req.extensions_mut().insert(claims);
                }
                Ok(false) => tracing::debug!(sid = %claims.sid, "session revoked or expired"),
                Err(e) => tracing::warn!(error = %e, "session lookup failed"),
            },
            Err(e) => tracing::debug!(error = %e, "rejected session token"),
        }
    }

    next.run(req).await
}
