use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use shared_types::{ApplicationNotification, NotifyError, NotifyResponse};
use tower_http::cors::{Any, CorsLayer};

use crate::db::AppState;
use crate::mailgun::send_application_emails;
use crate::rate_limit::{rate_limit_middleware, RateLimitState};

/// Browsers call this endpoint directly from the application pages.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Shares the submission limiter. CORS sits outside it so preflights are
/// answered without spending a slot.
pub fn notify_router(rate_limit: Option<RateLimitState>) -> Router<AppState> {
    let router = Router::new().route(
        "/api/notify-application",
        post(notify_application).options(preflight),
    );
    let router = match rate_limit {
        Some(limiter) => router.route_layer(middleware::from_fn_with_state(limiter, rate_limit_middleware)),
        None => router,
    };
    router.layer(cors_layer())
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn failure(message: impl Into<String>) -> Response {
    let body = NotifyError {
        error: message.into(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Email the admin inbox about a new application and confirm receipt to
/// the applicant.
///
/// Every failure, including an unreadable body, answers 500 with `{error}`.
#[utoipa::path(
    post,
    path = "/api/notify-application",
    request_body = ApplicationNotification,
    responses(
        (status = 200, description = "Both emails sent", body = NotifyResponse),
        (status = 500, description = "Delivery failed", body = NotifyError)
    ),
    tag = "notify"
)]
#[tracing::instrument(skip(state, body))]
pub async fn notify_application(State(state): State<AppState>, body: Bytes) -> Response {
    let notification: ApplicationNotification = match serde_json::from_slice(&body) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable notify-application body");
            return failure(e.to_string());
        }
    };

    match send_application_emails(state.mailer.as_ref(), &state.settings, &notification).await {
        Ok(sent) => (StatusCode::OK, Json(sent)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "notify-application failed");
            failure(e)
        }
    }
}
