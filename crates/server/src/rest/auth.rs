use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, Utc};
use shared_types::{
    AccessDecision, AppError, AuthResponse, LoginRequest, RegisterRequest, SessionInfo, User,
};

use crate::auth::cookies::{build_clear_cookie, build_session_cookie};
use crate::auth::extractors::{AuthRequired, MaybeAuth};
use crate::auth::jwt::create_session_token;
use crate::auth::{maybe_promote_admin, password};
use crate::db::AppState;
use crate::error_convert::ValidateRequest;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Open a session row for `user` and answer with the token in both the
/// body and an http-only cookie.
async fn start_session(state: &AppState, user: User, status: StatusCode) -> Result<Response, AppError> {
    let expires_at = Utc::now() + Duration::hours(state.settings.session_ttl_hours);
    let session_id = state.store.create_session(user.id, expires_at).await?;

    let access_token = create_session_token(
        &state.settings.jwt_secret,
        user.id,
        &user.email,
        session_id,
        expires_at,
    )
    .map_err(|e| {
        tracing::error!(error = %e, "failed to sign session token");
        AppError::internal("Could not start session")
    })?;

    let cookie = build_session_cookie(&state.settings, &access_token)?;
    let body = AuthResponse {
        user,
        access_token,
        expires_at,
    };

    Ok((status, [(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

// ---------------------------------------------------------------------------
// POST /api/auth/register
// ---------------------------------------------------------------------------

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 409, description = "Email already registered", body = AppError),
        (status = 422, description = "Validation failed", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(state, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    body.validate_request()?;

    let password_hash = password::hash_password(&body.password)?;
    let user = state
        .store
        .create_user(&body.email, &body.full_name, &password_hash)
        .await?;

    maybe_promote_admin(state.store.as_ref(), &state.settings, &user).await;
    tracing::info!(user_id = %user.id, "account registered");

    start_session(&state, user, StatusCode::CREATED).await
}

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

/// Sign in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AppError> {
    body.validate_request()?;

    let credentials = state
        .store
        .find_credentials(&body.email)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    if !password::verify_password(&body.password, &credentials.password_hash) {
        tracing::info!("login rejected");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    maybe_promote_admin(state.store.as_ref(), &state.settings, &credentials.user).await;

    start_session(&state, credentials.user, StatusCode::OK).await
}

// ---------------------------------------------------------------------------
// POST /api/auth/logout
// ---------------------------------------------------------------------------

/// Revoke the current session and clear the cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Signed out")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    MaybeAuth(claims): MaybeAuth,
) -> Result<Response, AppError> {
    if let Some(claims) = claims {
        state.store.revoke_session(claims.sid).await?;
        tracing::info!(user_id = %claims.sub, "signed out");
    }

    let cookie = build_clear_cookie(&state.settings)?;
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]).into_response())
}

// ---------------------------------------------------------------------------
// GET /api/auth/session
// ---------------------------------------------------------------------------

async fn session_info(state: &AppState, claims: &crate::auth::jwt::Claims) -> Result<Option<SessionInfo>, AppError> {
    let Some(user) = state.store.find_user(claims.sub).await? else {
        return Ok(None);
    };
    let role = state.store.role_of(user.id).await?;
    Ok(Some(SessionInfo { user, role }))
}

/// The signed-in user and their role.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = SessionInfo),
        (status = 401, description = "No session", body = AppError)
    ),
    tag = "auth"
)]
pub async fn session(
    State(state): State<AppState>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<SessionInfo>, AppError> {
    session_info(&state, &claims)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::unauthorized("Authentication required"))
}

// ---------------------------------------------------------------------------
// GET /api/admin/access
// ---------------------------------------------------------------------------

/// Evaluate the admin dashboard gate. Always 200; the body says whether to
/// redirect, deny or grant.
#[utoipa::path(
    get,
    path = "/api/admin/access",
    responses(
        (status = 200, description = "Gate decision", body = AccessDecision)
    ),
    tag = "auth"
)]
pub async fn access(
    State(state): State<AppState>,
    MaybeAuth(claims): MaybeAuth,
) -> Result<Json<AccessDecision>, AppError> {
    let info = match claims {
        Some(claims) => session_info(&state, &claims).await?,
        None => None,
    };
    Ok(Json(AccessDecision::evaluate(info.as_ref())))
}
